//! Sensor reading extraction from a site's sensor-selection page.

use std::sync::LazyLock;

use omnisense_protocol::{SensorMap, SensorReading, SensorType};
use regex_lite::Regex;
use tracing::{debug, trace};

use super::html::{Element, block_pattern, cells, elements, nested_elements, tag_pattern};
use crate::selection::SensorFilter;

/// Description the dashboard shows for sensors nobody has named.
pub const DESCRIPTION_PLACEHOLDER: &str = "~click to edit~";
/// Replacement for [`DESCRIPTION_PLACEHOLDER`].
pub const DESCRIPTION_NOT_SET: &str = "<description not set>";
/// Site name used when neither the page title nor the caller knows it.
pub const UNKNOWN_SITE: &str = "Unknown";

const TABLE_CLASSES: [&str; 2] = ["sortable", "table"];
const ROW_CLASS: &str = "sensorTable";
const TABLE_ID_PREFIX: &str = "sensorType";
const CELLS_PER_ROW: usize = 10;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| block_pattern("title"));
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| tag_pattern("table"));
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| block_pattern("tr"));
static CAPTION_RE: LazyLock<Regex> = LazyLock::new(|| block_pattern("caption"));
static SITE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Sensors for\s+(.+)").expect("SITE_NAME_RE should compile"));
static CAPTION_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Sensor Type\s*(\d+)").expect("CAPTION_TYPE_RE should compile"));

/// Extracts one reading per sensor row, keyed by sensor id.
///
/// The site name comes from a `Sensors for <name>` page title, then
/// `site_name_hint`, then [`UNKNOWN_SITE`]. Sensor tables are found at any
/// depth, including inside layout tables. Rows with fewer than ten cells and
/// rows rejected by `filter` are skipped; a temperature that does not parse
/// is left empty.
pub fn extract_sensors(html: &str, site_name_hint: Option<&str>, filter: &SensorFilter) -> SensorMap {
	let site_name = page_site_name(html)
		.or_else(|| site_name_hint.map(str::to_string))
		.unwrap_or_else(|| UNKNOWN_SITE.to_string());

	let mut readings = SensorMap::new();
	for table in nested_elements(html, &TABLE_RE) {
		if !TABLE_CLASSES.iter().all(|class| table.has_class(class)) {
			continue;
		}
		let sensor_type = table_sensor_type(&table);

		for row in elements(table.inner_html(), &ROW_RE) {
			if !row.has_class(ROW_CLASS) {
				continue;
			}
			let row_cells = cells(row.inner_html());
			let texts: Vec<String> = row_cells.iter().take(CELLS_PER_ROW).map(Element::text).collect();
			let Ok(fields) = <[String; CELLS_PER_ROW]>::try_from(texts) else {
				trace!(target: "omnisense", cells = row_cells.len(), "skipping short sensor row");
				continue;
			};
			let [sensor_id, description, last_activity, status, temperature, relative_humidity, absolute_humidity, dew_point, wood_pct, battery_voltage] = fields;

			if !filter.allows(&sensor_id) {
				continue;
			}

			let reading = SensorReading {
				description: normalize_description(description),
				last_activity,
				status,
				temperature: temperature.parse().ok(),
				relative_humidity,
				absolute_humidity,
				dew_point,
				wood_pct,
				battery_voltage,
				sensor_type,
				sensor_id: sensor_id.clone(),
				site_name: site_name.clone(),
			};
			readings.insert(sensor_id, reading);
		}
	}

	debug!(target: "omnisense", site = %site_name, count = readings.len(), "extracted sensor readings");
	readings
}

fn page_site_name(html: &str) -> Option<String> {
	let title = elements(html, &TITLE_RE).first()?.plain_text();
	let caps = SITE_NAME_RE.captures(&title)?;
	let name = caps[1].trim();
	(!name.is_empty()).then(|| name.to_string())
}

/// `sensorType<n>` table ids win over a `Sensor Type <n>` caption.
fn table_sensor_type(table: &Element<'_>) -> Option<SensorType> {
	let from_id = table
		.attr("id")
		.and_then(|id| id.strip_prefix(TABLE_ID_PREFIX).and_then(|n| n.parse::<u32>().ok()));
	if let Some(number) = from_id {
		return Some(SensorType::new(number));
	}

	let caption = elements(table.inner_html(), &CAPTION_RE).first()?.plain_text();
	let caps = CAPTION_TYPE_RE.captures(&caption)?;
	caps[1].parse::<u32>().ok().map(SensorType::new)
}

fn normalize_description(description: String) -> String {
	if description == DESCRIPTION_PLACEHOLDER {
		DESCRIPTION_NOT_SET.to_string()
	} else {
		description
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(cells: &[&str]) -> String {
		let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
		format!(r#"<tr class="sensorTable">{tds}</tr>"#)
	}

	fn full_row(id: &str, description: &str, temperature: &str) -> String {
		row(&[id, description, "2024-03-01 08:15", "Active", temperature, "48", "7.2", "3.9", "12", "3.05"])
	}

	fn page(title: &str, tables: &str) -> String {
		format!("<html><head><title>{title}</title></head><body>{tables}</body></html>")
	}

	#[test]
	fn reads_typed_table_by_id() {
		let html = page(
			"Sensors for Home",
			&format!(r#"<table id="sensorType3" class="sortable table">{}</table>"#, full_row("7", "Attic", "21.5")),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::all());

		let reading = &readings["7"];
		assert_eq!(reading.sensor_type, Some(SensorType::new(3)));
		assert_eq!(reading.sensor_id, "7");
		assert_eq!(reading.site_name, "Home");
		assert_eq!(reading.description, "Attic");
		assert_eq!(reading.temperature, Some(21.5));
		assert_eq!(reading.last_activity, "2024-03-01 08:15");
		assert_eq!(reading.status, "Active");
		assert_eq!(reading.relative_humidity, "48");
		assert_eq!(reading.absolute_humidity, "7.2");
		assert_eq!(reading.dew_point, "3.9");
		assert_eq!(reading.wood_pct, "12");
		assert_eq!(reading.battery_voltage, "3.05");
	}

	#[test]
	fn falls_back_to_caption_for_sensor_type() {
		let html = page(
			"Sensors for Barn",
			&format!(
				r#"<table class="table sortable"><caption>Sensor Type 11 (Wood)</caption>{}</table>
				<table class="sortable table"><caption>Misc</caption>{}</table>"#,
				full_row("1", "Beam", "5"),
				full_row("2", "Door", "6")
			),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::all());

		assert_eq!(readings["1"].sensor_type, Some(SensorType::new(11)));
		assert_eq!(readings["2"].sensor_type, None);
	}

	#[test]
	fn skips_short_rows_and_unmarked_tables() {
		let html = page(
			"Sensors for Home",
			&format!(
				r#"<table class="sortable table">{}{}<tr><td>not a sensor row</td></tr></table>
				<table class="sortable">{}</table>"#,
				row(&["9", "Short", "x", "y", "1.0", "2", "3", "4", "5"]),
				full_row("4", "Kitchen", "19"),
				full_row("5", "Ignored", "20")
			),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::all());

		assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["4"]);
	}

	#[test]
	fn unparseable_temperature_is_absent() {
		let html = page(
			"Sensors for Home",
			&format!(r#"<table class="sortable table">{}{}</table>"#, full_row("1", "A", "--"), full_row("2", "B", "n/a")),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::all());

		assert_eq!(readings["1"].temperature, None);
		assert_eq!(readings["2"].temperature, None);
		assert_eq!(readings["1"].battery_voltage, "3.05");
		assert_eq!(readings["2"].description, "B");
	}

	#[test]
	fn placeholder_description_becomes_sentinel() {
		let html = page(
			"Sensors for Home",
			&format!(
				r#"<table class="sortable table">{}{}</table>"#,
				full_row("1", "~click to edit~", "1"),
				full_row("2", "  Porch  ", "1")
			),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::all());

		assert_eq!(readings["1"].description, DESCRIPTION_NOT_SET);
		assert_eq!(readings["2"].description, "Porch");
	}

	#[test]
	fn filter_keeps_only_requested_sensors() {
		let html = page(
			"Sensors for Home",
			&format!(r#"<table class="sortable table">{}{}</table>"#, full_row("1", "A", "1"), full_row("2", "B", "2")),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::from("2"));

		assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["2"]);
	}

	#[test]
	fn site_name_falls_back_to_hint_then_unknown() {
		let tables = format!(r#"<table class="sortable table">{}</table>"#, full_row("1", "A", "1"));
		let untitled = format!("<html><body>{tables}</body></html>");

		assert_eq!(extract_sensors(&untitled, Some("Cabin"), &SensorFilter::all())["1"].site_name, "Cabin");
		assert_eq!(extract_sensors(&untitled, None, &SensorFilter::all())["1"].site_name, UNKNOWN_SITE);
		let titled = page("Omnisense", &tables);
		assert_eq!(extract_sensors(&titled, None, &SensorFilter::all())["1"].site_name, UNKNOWN_SITE);
	}

	#[test]
	fn finds_sensor_table_inside_layout_table() {
		let html = page(
			"Sensors for Home",
			&format!(
				r#"<table class="layout"><tr><td><table id="sensorType3" class="sortable table">{}</table></td>
				<td><table class="sortable table"><caption>Sensor Type 2</caption>{}</table></td></tr></table>"#,
				full_row("7", "Attic", "21.5"),
				full_row("8", "Cellar", "12")
			),
		);
		let readings = extract_sensors(&html, None, &SensorFilter::all());

		assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["7", "8"]);
		assert_eq!(readings["7"].sensor_type, Some(SensorType::new(3)));
		assert_eq!(readings["7"].sensor_type.map(|t| t.to_string()).as_deref(), Some("S-3"));
		assert_eq!(readings["8"].sensor_type, Some(SensorType::new(2)));
		assert_eq!(readings["7"].site_name, "Home");
	}

	#[test]
	fn page_without_tables_is_empty() {
		assert!(extract_sensors(&page("Sensors for Home", ""), None, &SensorFilter::all()).is_empty());
	}
}
