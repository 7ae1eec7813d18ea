//! Authenticated page fetching.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::session::SessionManager;

/// Fetches rendered HTML through the session's browser page.
///
/// One attempt per call: navigation failures and timeouts are returned to the
/// caller unchanged.
#[derive(Debug, Clone, Copy)]
pub struct PageFetcher {
	timeout: Duration,
}

impl PageFetcher {
	pub fn new(timeout: Duration) -> Self {
		Self { timeout }
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Navigates to `url`, logging in first if no session is live.
	///
	/// When the dashboard answers with its login page the session is expired
	/// and [`Error::SessionExpired`] is returned; the next call logs in again.
	pub async fn fetch(&self, session: &mut SessionManager, url: &str) -> Result<String> {
		let page = session.ensure_authenticated().await?;

		debug!(target: "omnisense.fetch", %url, "navigating");
		page.goto(url, self.timeout).await.map_err(|e| Error::fetch(url, e))?;
		let html = page.content().await.map_err(|e| Error::fetch(url, e))?;
		let current = page.url().await.map_err(|e| Error::fetch(url, e))?;

		if session.detector().is_login_page(&current, &html) {
			warn!(target: "omnisense.fetch", %url, landed = %current, "dashboard returned the login page");
			session.expire().await;
			return Err(Error::SessionExpired { url: url.to_string() });
		}

		debug!(target: "omnisense.fetch", %url, bytes = html.len(), "fetched page");
		Ok(html)
	}
}
