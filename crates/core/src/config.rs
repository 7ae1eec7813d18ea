//! Credentials and session tuning.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use omnisense_runtime::LaunchOptions;

use crate::session::{LoginDetector, LoginPageDetector};

/// Default bound on every navigation and on the post-login redirect.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Dashboard username and password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

impl Credentials {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
		}
	}

	/// Both parts are non-empty.
	pub fn is_complete(&self) -> bool {
		!self.username.is_empty() && !self.password.is_empty()
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Fully resolved settings for a dashboard session.
#[derive(Clone)]
pub struct SessionConfig {
	/// Bound on each page navigation.
	pub navigation_timeout: Duration,
	/// Bound on the redirect to the landing page after submitting the login form.
	pub login_timeout: Duration,
	/// Options passed to the browser launcher.
	pub launch: LaunchOptions,
	/// Decides whether a rendered page is the login page.
	pub detector: Arc<dyn LoginDetector>,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			navigation_timeout: DEFAULT_TIMEOUT,
			login_timeout: DEFAULT_TIMEOUT,
			launch: LaunchOptions::default(),
			detector: Arc::new(LoginPageDetector::default()),
		}
	}
}

impl fmt::Debug for SessionConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionConfig")
			.field("navigation_timeout", &self.navigation_timeout)
			.field("login_timeout", &self.login_timeout)
			.field("launch", &self.launch)
			.finish_non_exhaustive()
	}
}

impl SessionConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the bound applied to every page navigation.
	pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
		self.navigation_timeout = timeout;
		self
	}

	/// Sets the bound on the post-login redirect.
	pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
		self.login_timeout = timeout;
		self
	}

	/// Sets headless/headful mode.
	pub fn with_headless(mut self, headless: bool) -> Self {
		self.launch.headless = headless;
		self
	}

	/// Sets an explicit browser executable.
	pub fn with_executable(mut self, path: Option<PathBuf>) -> Self {
		self.launch.executable = path;
		self
	}

	/// Replaces the login-page predicate.
	pub fn with_detector(mut self, detector: impl LoginDetector + 'static) -> Self {
		self.detector = Arc::new(detector);
		self
	}
}
