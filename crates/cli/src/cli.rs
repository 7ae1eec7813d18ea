use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "omnisense")]
#[command(about = "Omnisense dashboard client - list sites, sensors and readings")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// JSON config file with credentials, default selections and browser settings
	#[arg(short, long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Dashboard username (overrides the config file)
	#[arg(long, global = true, env = "OMNISENSE_USERNAME")]
	pub username: Option<String>,

	/// Dashboard password (overrides the config file)
	#[arg(long, global = true, env = "OMNISENSE_PASSWORD", hide_env_values = true)]
	pub password: Option<String>,

	/// Show the browser window instead of running headless
	#[arg(long, global = true)]
	pub headful: bool,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List site ids and names
	Sites,

	/// List sensors (description, type, site) for the selected sites
	Sensors {
		/// Site id to include; repeatable. Defaults to the config file, then to every site
		#[arg(long = "site", value_name = "ID")]
		sites: Vec<String>,
	},

	/// Fetch current sensor readings
	#[command(alias = "data")]
	Readings {
		/// Site id to include; repeatable. Defaults to the config file, then to every site
		#[arg(long = "site", value_name = "ID")]
		sites: Vec<String>,

		/// Sensor id to keep; repeatable. Defaults to the config file, then to every sensor
		#[arg(long = "sensor", value_name = "ID")]
		sensors: Vec<String>,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_repeated_selectors() {
		let cli = Cli::try_parse_from(["omnisense", "-vv", "readings", "--site", "10", "--site", "20", "--sensor", "7", "-f", "text"]).unwrap();

		assert_eq!(cli.verbose, 2);
		assert_eq!(cli.format, OutputFormat::Text);
		match cli.command {
			Commands::Readings { sites, sensors } => {
				assert_eq!(sites, vec!["10", "20"]);
				assert_eq!(sensors, vec!["7"]);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn global_flags_follow_subcommands() {
		let cli = Cli::try_parse_from(["omnisense", "sites", "--headful", "--config", "omnisense.json"]).unwrap();

		assert!(cli.headful);
		assert_eq!(cli.config, Some(PathBuf::from("omnisense.json")));
		assert_eq!(cli.format, OutputFormat::Json);
		assert!(matches!(cli.command, Commands::Sites));
	}
}
