//! Browser launch options.

use std::path::PathBuf;

/// Options applied when a launcher starts a browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
	/// Run without a visible window.
	pub headless: bool,
	/// Explicit browser executable; the launcher searches the usual locations when unset.
	pub executable: Option<PathBuf>,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self { headless: true, executable: None }
	}
}

impl LaunchOptions {
	pub fn headless(mut self, headless: bool) -> Self {
		self.headless = headless;
		self
	}

	pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
		self.executable = Some(path.into());
		self
	}
}
