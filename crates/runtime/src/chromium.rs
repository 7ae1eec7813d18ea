//! Headless Chromium driver over the DevTools protocol.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::driver::{BrowserLauncher, PageDriver};
use crate::error::{DriverError, Result};
use crate::options::LaunchOptions;
use crate::pattern::UrlPattern;

const URL_POLL_INTERVAL: Duration = Duration::from_millis(100);
const HANDLER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const CLEAR_VALUE_FN: &str = "function() { this.value = ''; }";

/// Launches a local Chromium/Chrome through `chromiumoxide`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromiumLauncher;

impl ChromiumLauncher {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
	async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn PageDriver>> {
		debug!(target: "omnisense.runtime", headless = options.headless, "starting Chromium...");

		let mut builder = BrowserConfig::builder();
		if !options.headless {
			builder = builder.with_head();
		}
		if let Some(path) = &options.executable {
			builder = builder.chrome_executable(path);
		}
		let config = builder.build().map_err(DriverError::Launch)?;

		let (browser, mut handler) = Browser::launch(config).await.map_err(|e| DriverError::Launch(e.to_string()))?;

		// The handler stream drives the CDP connection and must be polled for the browser to make progress.
		let handler = tokio::spawn(async move {
			while let Some(event) = handler.next().await {
				if let Err(err) = event {
					trace!(target: "omnisense.runtime", error = %err, "CDP handler error");
				}
			}
		});

		let mut session = ChromiumPage {
			browser: Some(browser),
			page: None,
			handler: Some(handler),
		};

		let opened = match session.browser.as_ref() {
			Some(browser) => browser.new_page("about:blank").await.map_err(protocol),
			None => Err(DriverError::Closed),
		};
		match opened {
			Ok(page) => {
				session.page = Some(page);
				Ok(Box::new(session))
			}
			Err(err) => {
				if let Err(close_err) = session.close().await {
					warn!(target: "omnisense.runtime", error = %close_err, "failed to close browser after page creation error");
				}
				Err(err)
			}
		}
	}
}

/// One Chromium page together with the browser process that owns it.
pub struct ChromiumPage {
	browser: Option<Browser>,
	page: Option<Page>,
	handler: Option<JoinHandle<()>>,
}

impl ChromiumPage {
	fn page(&self) -> Result<&Page> {
		self.page.as_ref().ok_or(DriverError::Closed)
	}
}

fn protocol(err: impl std::fmt::Display) -> DriverError {
	DriverError::Protocol(err.to_string())
}

#[async_trait]
impl PageDriver for ChromiumPage {
	async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
		let page = self.page()?;
		match tokio::time::timeout(timeout, page.goto(url)).await {
			Ok(Ok(_)) => Ok(()),
			Ok(Err(err)) => Err(DriverError::Navigation {
				url: url.to_string(),
				message: err.to_string(),
			}),
			Err(_) => Err(DriverError::Timeout {
				action: format!("navigation to {url}"),
				timeout,
			}),
		}
	}

	async fn fill(&mut self, selector: &str, value: &str) -> Result<()> {
		let page = self.page()?;
		let element = page.find_element(selector).await.map_err(|_| DriverError::ElementNotFound {
			selector: selector.to_string(),
		})?;
		element.call_js_fn(CLEAR_VALUE_FN, false).await.map_err(protocol)?;
		element.click().await.map_err(protocol)?;
		element.type_str(value).await.map_err(protocol)?;
		Ok(())
	}

	async fn click(&mut self, selector: &str) -> Result<()> {
		let page = self.page()?;
		let element = page.find_element(selector).await.map_err(|_| DriverError::ElementNotFound {
			selector: selector.to_string(),
		})?;
		element.click().await.map_err(protocol)?;
		Ok(())
	}

	async fn wait_for_url(&mut self, pattern: &UrlPattern, timeout: Duration) -> Result<()> {
		let page = self.page()?;
		let deadline = Instant::now() + timeout;
		loop {
			let current = page.url().await.map_err(protocol)?.unwrap_or_default();
			if pattern.matches(&current) {
				return Ok(());
			}
			if Instant::now() >= deadline {
				return Err(DriverError::Timeout {
					action: format!("URL matching {pattern}"),
					timeout,
				});
			}
			tokio::time::sleep(URL_POLL_INTERVAL).await;
		}
	}

	async fn content(&mut self) -> Result<String> {
		self.page()?.content().await.map_err(protocol)
	}

	async fn url(&mut self) -> Result<String> {
		Ok(self.page()?.url().await.map_err(protocol)?.unwrap_or_default())
	}

	async fn close(&mut self) -> Result<()> {
		self.page = None;

		let mut result = Ok(());
		if let Some(mut browser) = self.browser.take() {
			debug!(target: "omnisense.runtime", "closing Chromium");
			if let Err(err) = browser.close().await {
				result = Err(protocol(err));
			}
			if let Err(err) = browser.wait().await {
				warn!(target: "omnisense.runtime", error = %err, "failed to reap browser process");
			}
		}

		if let Some(handler) = self.handler.take() {
			let abort = handler.abort_handle();
			if tokio::time::timeout(HANDLER_SHUTDOWN_TIMEOUT, handler).await.is_err() {
				warn!(target: "omnisense.runtime", "CDP handler did not stop; aborting");
				abort.abort();
			}
		}

		result
	}
}
