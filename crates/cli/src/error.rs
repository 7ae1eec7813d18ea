use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("Configuration error: {0:#}")]
	Config(#[from] anyhow::Error),

	#[error(transparent)]
	Client(#[from] omnisense::Error),

	#[error("Failed to render output: {0}")]
	Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
