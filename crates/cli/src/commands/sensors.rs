use omnisense::{Omnisense, SiteSelection};
use tracing::info;

use crate::error::Result;
use crate::output::{OutputFormat, render_summaries};

pub async fn execute(client: &mut Omnisense, sites: Option<SiteSelection>, format: OutputFormat) -> Result<String> {
	let sensors = client.get_site_sensor_list(sites).await?;
	info!(target: "omnisense", count = sensors.len(), "sensors");
	render_summaries(&sensors, format)
}
