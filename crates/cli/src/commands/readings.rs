use omnisense::{Omnisense, SensorFilter, SiteSelection};
use tracing::info;

use crate::error::Result;
use crate::output::{OutputFormat, render_readings};

pub async fn execute(client: &mut Omnisense, sites: Option<SiteSelection>, sensors: &SensorFilter, format: OutputFormat) -> Result<String> {
	let readings = client.get_sensor_data(sites, sensors).await?;
	info!(target: "omnisense", count = readings.len(), filtered = !sensors.is_unrestricted(), "readings");
	render_readings(&readings, format)
}
