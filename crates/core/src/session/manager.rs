//! Session orchestration for login, lazy re-login and teardown.

use std::sync::Arc;

use omnisense_runtime::{BrowserLauncher, PageDriver};
use tracing::{debug, error, info, warn};

use super::detector::LoginDetector;
use super::state::{SessionState, SessionStatus};
use crate::config::{Credentials, SessionConfig};
use crate::endpoints::{LANDING_PATTERN, LOGIN_URL, PASSWORD_FIELD, SUBMIT_BUTTON, USERNAME_FIELD};
use crate::error::{Error, Result};

/// Owns the credentials and the authenticated browser page of one client.
///
/// Every data-fetching path goes through [`SessionManager::ensure_authenticated`],
/// which logs in with the stored credentials whenever no session is live.
pub struct SessionManager {
	launcher: Arc<dyn BrowserLauncher>,
	config: SessionConfig,
	credentials: Option<Credentials>,
	state: SessionState,
}

impl SessionManager {
	pub fn new(launcher: Arc<dyn BrowserLauncher>, config: SessionConfig) -> Self {
		Self {
			launcher,
			config,
			credentials: None,
			state: SessionState::default(),
		}
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	pub fn status(&self) -> SessionStatus {
		self.state.status()
	}

	pub fn has_credentials(&self) -> bool {
		self.credentials.is_some()
	}

	pub fn detector(&self) -> &dyn LoginDetector {
		self.config.detector.as_ref()
	}

	/// Logs in, replacing any live session.
	///
	/// Complete `credentials` are stored for later re-login; with `None` (or an
	/// incomplete pair) the stored ones are used. Fails with
	/// [`Error::InvalidCredentials`] before touching the browser when neither
	/// exists. On any failure the browser is released and the state is `Closed`.
	pub async fn login(&mut self, credentials: Option<Credentials>) -> Result<()> {
		let credentials = match credentials.filter(Credentials::is_complete) {
			Some(credentials) => {
				self.credentials = Some(credentials.clone());
				credentials
			}
			None => self.stored_credentials()?,
		};

		self.sign_in(credentials).await.map(|_| ())
	}

	/// Returns the live page, logging in with stored credentials first when needed.
	pub async fn ensure_authenticated(&mut self) -> Result<&mut dyn PageDriver> {
		match self.state.take_live() {
			Some(page) => Ok(self.state.activate(page)),
			None => {
				debug!(target: "omnisense.session", state = %self.status(), "no active session; logging in");
				let credentials = self.stored_credentials()?;
				self.sign_in(credentials).await
			}
		}
	}

	/// Drops a session the dashboard has ended so the next call logs in again.
	pub async fn expire(&mut self) {
		if let Err(err) = self.release().await {
			warn!(target: "omnisense.session", error = %err, "failed to close expired session");
		}
		self.state.expire();
		info!(target: "omnisense.session", "session expired");
	}

	/// Releases the browser and its driver. Safe to call from any state.
	pub async fn close(&mut self) -> Result<()> {
		if self.release().await? {
			info!(target: "omnisense.session", "session closed");
		} else {
			debug!(target: "omnisense.session", "close requested with no open session");
		}
		Ok(())
	}

	fn stored_credentials(&self) -> Result<Credentials> {
		self.credentials.clone().ok_or_else(|| {
			error!(target: "omnisense.session", "no username or password provided");
			Error::InvalidCredentials
		})
	}

	/// Replaces any live session with a freshly logged-in page and returns it.
	async fn sign_in(&mut self, credentials: Credentials) -> Result<&mut dyn PageDriver> {
		if let Err(err) = self.release().await {
			warn!(target: "omnisense.session", error = %err, "failed to close previous session");
		}

		info!(target: "omnisense.session", username = %credentials.username, "logging in");
		match authenticate(self.launcher.as_ref(), &self.config, &credentials).await {
			Ok(page) => {
				info!(target: "omnisense.session", "login successful");
				Ok(self.state.activate(page))
			}
			Err(err) => {
				error!(target: "omnisense.session", error = %err, "login error");
				Err(err)
			}
		}
	}

	/// Moves to `Closed`, closing the page if one was live.
	async fn release(&mut self) -> Result<bool> {
		match self.state.release() {
			Some(mut page) => {
				page.close().await?;
				Ok(true)
			}
			None => Ok(false),
		}
	}
}

/// Launches a browser and submits the login form, closing the browser on failure.
async fn authenticate(launcher: &dyn BrowserLauncher, config: &SessionConfig, credentials: &Credentials) -> Result<Box<dyn PageDriver>> {
	let mut page = launcher.launch(&config.launch).await.map_err(Error::login)?;

	match submit_login(page.as_mut(), config, credentials).await {
		Ok(()) => Ok(page),
		Err(err) => {
			if let Err(close_err) = page.close().await {
				warn!(target: "omnisense.session", error = %close_err, "failed to close browser after login failure");
			}
			Err(err)
		}
	}
}

async fn submit_login(page: &mut dyn PageDriver, config: &SessionConfig, credentials: &Credentials) -> Result<()> {
	page.goto(LOGIN_URL, config.navigation_timeout).await.map_err(Error::login)?;
	page.fill(USERNAME_FIELD, &credentials.username).await.map_err(Error::login)?;
	page.fill(PASSWORD_FIELD, &credentials.password).await.map_err(Error::login)?;
	page.click(SUBMIT_BUTTON).await.map_err(Error::login)?;

	// A rejected login re-renders the form instead of redirecting, so a timeout here is inspected, not returned.
	let redirect_timeout = match page.wait_for_url(&LANDING_PATTERN, config.login_timeout).await {
		Ok(()) => None,
		Err(err) if err.is_timeout() => Some(err),
		Err(err) => return Err(Error::login(err)),
	};

	let url = page.url().await.map_err(Error::login)?;
	let html = page.content().await.map_err(Error::login)?;
	if config.detector.is_login_page(&url, &html) {
		return Err(Error::AuthenticationFailed { url });
	}

	match redirect_timeout {
		Some(err) => Err(Error::login(err)),
		None => Ok(()),
	}
}
