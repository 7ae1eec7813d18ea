//! Client configuration file and command-line overrides.
//!
//! The file is JSON; every key is optional:
//!
//! ```json
//! {
//!   "username": "alice",
//!   "password": "secret",
//!   "site_ids": { "10": "Home" },
//!   "sensor_ids": ["7"],
//!   "headless": true,
//!   "timeout_secs": 10,
//!   "chrome_executable": "/usr/bin/chromium"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use omnisense::{Credentials, SensorFilter, SessionConfig, SiteSelection};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cli::Cli;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
	pub username: Option<String>,
	pub password: Option<String>,
	/// A site id, a list of ids, or an object of ids to names.
	pub site_ids: Option<Value>,
	/// A sensor id or a list of ids.
	pub sensor_ids: Option<Value>,
	pub headless: Option<bool>,
	pub timeout_secs: Option<u64>,
	pub chrome_executable: Option<PathBuf>,
}

impl ClientConfig {
	pub fn from_file(path: &Path) -> anyhow::Result<Self> {
		debug!(target: "omnisense", path = %path.display(), "loading config");
		let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
		serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
	}

	/// The file named by `--config` (if any) with flag and environment values applied on top.
	pub fn load(cli: &Cli) -> anyhow::Result<Self> {
		let config = match &cli.config {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		Ok(config.with_overrides(cli.username.clone(), cli.password.clone(), cli.headful))
	}

	pub fn with_overrides(mut self, username: Option<String>, password: Option<String>, headful: bool) -> Self {
		if username.is_some() {
			self.username = username;
		}
		if password.is_some() {
			self.password = password;
		}
		if headful {
			self.headless = Some(false);
		}
		self
	}

	/// `None` unless both parts are present and non-empty.
	pub fn credentials(&self) -> Option<Credentials> {
		let credentials = Credentials::new(self.username.clone()?, self.password.clone()?);
		credentials.is_complete().then_some(credentials)
	}

	pub fn session_config(&self) -> SessionConfig {
		let mut config = SessionConfig::new()
			.with_headless(self.headless.unwrap_or(true))
			.with_executable(self.chrome_executable.clone());
		if let Some(secs) = self.timeout_secs {
			let timeout = Duration::from_secs(secs);
			config = config.with_navigation_timeout(timeout).with_login_timeout(timeout);
		}
		config
	}

	/// Sites from the command line, else from the file.
	pub fn site_selection(&self, flags: &[String]) -> omnisense::Result<Option<SiteSelection>> {
		if !flags.is_empty() {
			return Ok(Some(SiteSelection::Many(flags.to_vec())));
		}
		self.site_ids.clone().map(SiteSelection::try_from).transpose()
	}

	/// Sensors from the command line, else from the file.
	pub fn sensor_filter(&self, flags: &[String]) -> omnisense::Result<SensorFilter> {
		if !flags.is_empty() {
			return Ok(SensorFilter::only(flags.iter().cloned()));
		}
		match self.sensor_ids.clone() {
			Some(value) => SensorFilter::try_from(value),
			None => Ok(SensorFilter::all()),
		}
	}
}
