use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

/// Failures reported by a browser driver.
#[derive(Debug, Error)]
pub enum DriverError {
	#[error("Failed to launch browser: {0}")]
	Launch(String),

	#[error("Navigation to {url} failed: {message}")]
	Navigation { url: String, message: String },

	#[error("Timed out after {timeout:?} waiting for {action}")]
	Timeout { action: String, timeout: Duration },

	#[error("No element matches selector {selector}")]
	ElementNotFound { selector: String },

	#[error("Browser page is closed")]
	Closed,

	#[error("Browser protocol error: {0}")]
	Protocol(String),
}

impl DriverError {
	pub fn is_timeout(&self) -> bool {
		matches!(self, DriverError::Timeout { .. })
	}
}
