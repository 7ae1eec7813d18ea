//! Fake browser for unit testing page-driving code.
//!
//! Provides an in-memory launcher that serves scripted HTML per URL and
//! simulates a single login form, so session and scraping logic can be tested
//! without launching a browser.
//!
//! # Example
//!
//! ```ignore
//! let (launcher, controller) = FakeBrowserBuilder::new()
//!     .page("https://example.com/login", LOGIN_HTML)
//!     .page("https://example.com/home", HOME_HTML)
//!     .login_form(FakeLoginForm::new("#user", "#pass", "#go", "https://example.com/home").accepts("alice", "secret"))
//!     .build();
//!
//! let mut page = launcher.launch(&LaunchOptions::default()).await?;
//! page.goto("https://example.com/login", Duration::from_secs(1)).await?;
//! assert_eq!(controller.navigations(), vec!["https://example.com/login"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::driver::{BrowserLauncher, PageDriver};
use crate::error::{DriverError, Result};
use crate::options::LaunchOptions;
use crate::pattern::UrlPattern;

const BLANK_URL: &str = "about:blank";

/// Something the fake browser was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
	Launch,
	Goto(String),
	Fill { selector: String, value: String },
	Click(String),
	Close,
}

/// A login form the fake browser simulates.
///
/// Clicking `submit` with the accepted credentials filled in navigates to
/// `landing_url`; any other values leave the page where it is.
#[derive(Debug, Clone)]
pub struct FakeLoginForm {
	username_field: String,
	password_field: String,
	submit: String,
	landing_url: String,
	username: String,
	password: String,
}

impl FakeLoginForm {
	pub fn new(username_field: impl Into<String>, password_field: impl Into<String>, submit: impl Into<String>, landing_url: impl Into<String>) -> Self {
		Self {
			username_field: username_field.into(),
			password_field: password_field.into(),
			submit: submit.into(),
			landing_url: landing_url.into(),
			username: String::new(),
			password: String::new(),
		}
	}

	/// Sets the credentials the form accepts.
	pub fn accepts(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
		self.username = username.into();
		self.password = password.into();
		self
	}
}

#[derive(Debug, Clone)]
enum FakeResponse {
	Html(String),
	Fail(String),
}

#[derive(Debug, Default)]
struct FakeState {
	pages: HashMap<String, FakeResponse>,
	login_form: Option<FakeLoginForm>,
	missing_elements: HashSet<String>,
	launch_failure: Option<String>,
	events: Vec<FakeEvent>,
}

/// Builder for creating fake browser instances.
#[derive(Debug, Default)]
pub struct FakeBrowserBuilder {
	state: FakeState,
}

impl FakeBrowserBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Serves `html` when the page navigates to `url`.
	pub fn page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
		self.state.pages.insert(url.into(), FakeResponse::Html(html.into()));
		self
	}

	/// Fails navigation to `url` with `message`.
	pub fn failing_page(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
		self.state.pages.insert(url.into(), FakeResponse::Fail(message.into()));
		self
	}

	pub fn login_form(mut self, form: FakeLoginForm) -> Self {
		self.state.login_form = Some(form);
		self
	}

	/// Makes `fill`/`click` on `selector` report a missing element.
	pub fn missing_element(mut self, selector: impl Into<String>) -> Self {
		self.state.missing_elements.insert(selector.into());
		self
	}

	/// Makes every launch fail with `message`.
	pub fn failing_launch(mut self, message: impl Into<String>) -> Self {
		self.state.launch_failure = Some(message.into());
		self
	}

	/// Build the fake browser and return both the launcher and a controller.
	///
	/// Returns a [`FakeLauncher`] to hand to the code under test and a
	/// [`FakeBrowserController`] for changing pages and inspecting recorded events.
	pub fn build(self) -> (FakeLauncher, FakeBrowserController) {
		let state = Arc::new(Mutex::new(self.state));
		(
			FakeLauncher {
				state: Arc::clone(&state),
			},
			FakeBrowserController { state },
		)
	}
}

/// Controller for scripting pages and inspecting what the browser was asked to do.
#[derive(Debug, Clone)]
pub struct FakeBrowserController {
	state: Arc<Mutex<FakeState>>,
}

impl FakeBrowserController {
	/// Replaces the page served for `url`.
	pub fn set_page(&self, url: impl Into<String>, html: impl Into<String>) {
		self.state.lock().pages.insert(url.into(), FakeResponse::Html(html.into()));
	}

	/// Makes navigation to `url` fail from now on.
	pub fn fail_page(&self, url: impl Into<String>, message: impl Into<String>) {
		self.state.lock().pages.insert(url.into(), FakeResponse::Fail(message.into()));
	}

	/// All recorded events in order.
	pub fn events(&self) -> Vec<FakeEvent> {
		self.state.lock().events.clone()
	}

	/// Take all recorded events, clearing the buffer.
	pub fn take_events(&self) -> Vec<FakeEvent> {
		std::mem::take(&mut self.state.lock().events)
	}

	/// URLs navigated to, in order.
	pub fn navigations(&self) -> Vec<String> {
		self.state
			.lock()
			.events
			.iter()
			.filter_map(|event| match event {
				FakeEvent::Goto(url) => Some(url.clone()),
				_ => None,
			})
			.collect()
	}

	pub fn launches(&self) -> usize {
		self.count(|event| matches!(event, FakeEvent::Launch))
	}

	pub fn closes(&self) -> usize {
		self.count(|event| matches!(event, FakeEvent::Close))
	}

	/// Browsers launched and not yet closed.
	pub fn open_browsers(&self) -> usize {
		self.launches().saturating_sub(self.closes())
	}

	fn count(&self, predicate: impl Fn(&FakeEvent) -> bool) -> usize {
		self.state.lock().events.iter().filter(|event| predicate(event)).count()
	}
}

/// Launcher handing out [`FakePage`]s backed by shared scripted state.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
	async fn launch(&self, _options: &LaunchOptions) -> Result<Box<dyn PageDriver>> {
		let mut state = self.state.lock();
		state.events.push(FakeEvent::Launch);
		if let Some(message) = state.launch_failure.clone() {
			// A failed launch leaves nothing running.
			state.events.push(FakeEvent::Close);
			return Err(DriverError::Launch(message));
		}
		Ok(Box::new(FakePage {
			state: Arc::clone(&self.state),
			url: BLANK_URL.to_string(),
			html: String::new(),
			fields: HashMap::new(),
			closed: false,
		}))
	}
}

/// A page of the fake browser.
#[derive(Debug)]
pub struct FakePage {
	state: Arc<Mutex<FakeState>>,
	url: String,
	html: String,
	fields: HashMap<String, String>,
	closed: bool,
}

impl FakePage {
	fn ensure_open(&self) -> Result<()> {
		if self.closed { Err(DriverError::Closed) } else { Ok(()) }
	}

	fn ensure_element(&self, selector: &str) -> Result<()> {
		if self.state.lock().missing_elements.contains(selector) {
			Err(DriverError::ElementNotFound {
				selector: selector.to_string(),
			})
		} else {
			Ok(())
		}
	}

	fn load(&mut self, url: &str) -> Result<()> {
		let response = self.state.lock().pages.get(url).cloned();
		match response {
			Some(FakeResponse::Html(html)) => {
				self.url = url.to_string();
				self.html = html;
				self.fields.clear();
				Ok(())
			}
			Some(FakeResponse::Fail(message)) => Err(DriverError::Navigation {
				url: url.to_string(),
				message,
			}),
			None => Err(DriverError::Navigation {
				url: url.to_string(),
				message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
			}),
		}
	}
}

#[async_trait]
impl PageDriver for FakePage {
	async fn goto(&mut self, url: &str, _timeout: Duration) -> Result<()> {
		self.ensure_open()?;
		self.state.lock().events.push(FakeEvent::Goto(url.to_string()));
		self.load(url)
	}

	async fn fill(&mut self, selector: &str, value: &str) -> Result<()> {
		self.ensure_open()?;
		self.ensure_element(selector)?;
		self.state.lock().events.push(FakeEvent::Fill {
			selector: selector.to_string(),
			value: value.to_string(),
		});
		self.fields.insert(selector.to_string(), value.to_string());
		Ok(())
	}

	async fn click(&mut self, selector: &str) -> Result<()> {
		self.ensure_open()?;
		self.ensure_element(selector)?;
		let form = {
			let mut state = self.state.lock();
			state.events.push(FakeEvent::Click(selector.to_string()));
			state.login_form.clone()
		};

		let Some(form) = form.filter(|form| form.submit == selector) else {
			return Ok(());
		};
		let accepted = self.fields.get(&form.username_field).is_some_and(|v| *v == form.username)
			&& self.fields.get(&form.password_field).is_some_and(|v| *v == form.password);
		if accepted {
			self.load(&form.landing_url)
		} else {
			// Rejected submissions re-render the current page.
			let current = self.url.clone();
			self.load(&current)
		}
	}

	async fn wait_for_url(&mut self, pattern: &UrlPattern, timeout: Duration) -> Result<()> {
		self.ensure_open()?;
		if pattern.matches(&self.url) {
			Ok(())
		} else {
			Err(DriverError::Timeout {
				action: format!("URL matching {pattern}"),
				timeout,
			})
		}
	}

	async fn content(&mut self) -> Result<String> {
		self.ensure_open()?;
		Ok(self.html.clone())
	}

	async fn url(&mut self) -> Result<String> {
		self.ensure_open()?;
		Ok(self.url.clone())
	}

	async fn close(&mut self) -> Result<()> {
		if !self.closed {
			self.closed = true;
			self.state.lock().events.push(FakeEvent::Close);
		}
		Ok(())
	}
}
