use omnisense_runtime::DriverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Login was requested with no usable credentials supplied or stored.
	#[error("No username or password provided")]
	InvalidCredentials,

	/// The dashboard rejected the credentials and showed the login page again.
	#[error("Login failed: incorrect credentials or unexpected redirect (ended on {url})")]
	AuthenticationFailed { url: String },

	#[error("Login error: {source}")]
	Login {
		#[source]
		source: DriverError,
	},

	#[error("Failed to fetch {url}: {source}")]
	Fetch {
		url: String,
		#[source]
		source: DriverError,
	},

	/// A fetch landed on the login page, so the dashboard session has ended.
	#[error("Session expired while fetching {url}")]
	SessionExpired { url: String },

	#[error("Unsupported site id selection: expected a string, a list of strings, or an object of strings (got {0})")]
	UnsupportedSiteIds(&'static str),

	#[error("Unsupported sensor id selection: expected a string or a list of strings (got {0})")]
	UnsupportedSensorIds(&'static str),

	#[error(transparent)]
	Driver(#[from] DriverError),
}

impl Error {
	pub(crate) fn login(source: DriverError) -> Self {
		Error::Login { source }
	}

	pub(crate) fn fetch(url: &str, source: DriverError) -> Self {
		Error::Fetch { url: url.to_string(), source }
	}

	/// Returns `true` for failures of the login sequence itself.
	pub fn is_login_failure(&self) -> bool {
		matches!(self, Error::InvalidCredentials | Error::AuthenticationFailed { .. } | Error::Login { .. })
	}
}
