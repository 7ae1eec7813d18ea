use omnisense_protocol::{SensorMap, SensorSummaryMap, SiteDirectory};
use serde::Serialize;

use super::OutputFormat;
use crate::error::Result;

const EMPTY_CELL: &str = "-";

pub fn render_sites(sites: &SiteDirectory, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Json => json(sites),
		OutputFormat::Text => Ok(table(
			&["SITE", "NAME"],
			sites.iter().map(|(id, name)| vec![id.to_string(), name.to_string()]).collect(),
		)),
	}
}

pub fn render_summaries(sensors: &SensorSummaryMap, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Json => json(sensors),
		OutputFormat::Text => Ok(table(
			&["SENSOR", "TYPE", "SITE", "DESCRIPTION"],
			sensors
				.iter()
				.map(|(id, s)| vec![id.clone(), optional(s.sensor_type), s.site_name.clone(), s.description.clone()])
				.collect(),
		)),
	}
}

pub fn render_readings(readings: &SensorMap, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Json => json(readings),
		OutputFormat::Text => Ok(table(
			&["SENSOR", "TYPE", "SITE", "DESCRIPTION", "LAST ACTIVITY", "STATUS", "TEMP", "RH", "AH", "DEW PT", "WOOD %", "BATT V"],
			readings
				.iter()
				.map(|(id, r)| {
					vec![
						id.clone(),
						optional(r.sensor_type),
						r.site_name.clone(),
						r.description.clone(),
						r.last_activity.clone(),
						r.status.clone(),
						optional(r.temperature),
						r.relative_humidity.clone(),
						r.absolute_humidity.clone(),
						r.dew_point.clone(),
						r.wood_pct.clone(),
						r.battery_voltage.clone(),
					]
				})
				.collect(),
		)),
	}
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
	Ok(serde_json::to_string_pretty(value)?)
}

fn optional<T: ToString>(value: Option<T>) -> String {
	value.map_or_else(|| EMPTY_CELL.to_string(), |v| v.to_string())
}

/// Left-aligned columns separated by two spaces.
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
	let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.chars().count());
		}
	}

	let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
	std::iter::once(&header)
		.chain(rows.iter())
		.map(|cells| {
			cells
				.iter()
				.zip(&widths)
				.map(|(cell, &width)| format!("{cell:<width$}"))
				.collect::<Vec<_>>()
				.join("  ")
				.trim_end()
				.to_string()
		})
		.collect::<Vec<_>>()
		.join("\n")
}
