//! Subcommand execution.

mod readings;
mod sensors;
mod sites;

use std::sync::Arc;

use omnisense::{Credentials, Error, Omnisense};
use omnisense_runtime::{BrowserLauncher, ChromiumLauncher};
use tracing::{info_span, warn};

use crate::cli::{Cli, Commands};
use crate::config::ClientConfig;
use crate::error::Result;

pub async fn dispatch(cli: Cli) -> Result<()> {
	let output = execute(cli, Arc::new(ChromiumLauncher::new())).await?;
	println!("{output}");
	Ok(())
}

/// Runs one subcommand against `launcher` and returns the rendered output.
///
/// The client is closed before returning, whether or not the command succeeded.
pub async fn execute(cli: Cli, launcher: Arc<dyn BrowserLauncher>) -> Result<String> {
	let config = ClientConfig::load(&cli)?;
	let credentials = config.credentials().ok_or(Error::InvalidCredentials)?;

	let span = info_span!(target: "omnisense", "omnisense", user = %credentials.username);
	let mut client = Omnisense::with_config(launcher, config.session_config()).with_span(span);

	let outcome = run(&mut client, credentials, &cli, &config).await;

	if let Err(err) = client.close().await {
		warn!(target: "omnisense", error = %err, "failed to close browser");
	}
	outcome
}

async fn run(client: &mut Omnisense, credentials: Credentials, cli: &Cli, config: &ClientConfig) -> Result<String> {
	client.login(credentials).await?;
	match &cli.command {
		Commands::Sites => sites::execute(client, cli.format).await,
		Commands::Sensors { sites } => sensors::execute(client, config.site_selection(sites)?, cli.format).await,
		Commands::Readings { sites, sensors } => readings::execute(client, config.site_selection(sites)?, &config.sensor_filter(sensors)?, cli.format).await,
	}
}
