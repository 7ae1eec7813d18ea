//! Browser collaborator traits.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::options::LaunchOptions;
use crate::pattern::UrlPattern;

/// Starts browsers and hands out a single page to drive.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
	/// Launches a browser and opens one blank page in it.
	async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn PageDriver>>;
}

/// A single browser page plus ownership of the browser behind it.
///
/// Closing the page also shuts down the browser process and its protocol
/// connection. Implementations must make [`PageDriver::close`] idempotent.
#[async_trait]
pub trait PageDriver: Send {
	/// Navigates to `url` and waits for the load to finish.
	async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()>;

	/// Replaces the value of the first input matching `selector`.
	async fn fill(&mut self, selector: &str, value: &str) -> Result<()>;

	/// Clicks the first element matching `selector`.
	async fn click(&mut self, selector: &str) -> Result<()>;

	/// Waits until the page URL matches `pattern`.
	async fn wait_for_url(&mut self, pattern: &UrlPattern, timeout: Duration) -> Result<()>;

	/// Returns the rendered HTML of the current document.
	async fn content(&mut self) -> Result<String>;

	/// Returns the URL of the current document.
	async fn url(&mut self) -> Result<String>;

	/// Closes the page, the browser and the underlying driver connection.
	async fn close(&mut self) -> Result<()>;
}
