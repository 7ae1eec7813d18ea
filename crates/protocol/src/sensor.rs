//! Sensor reading types.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sensor readings keyed by sensor id, in page order.
pub type SensorMap = IndexMap<String, SensorReading>;

/// Reduced sensor records keyed by sensor id, in page order.
pub type SensorSummaryMap = IndexMap<String, SensorSummary>;

/// Hardware family tag of a sensor, rendered as `S-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SensorType(u32);

impl SensorType {
	pub fn new(number: u32) -> Self {
		Self(number)
	}

	pub fn number(self) -> u32 {
		self.0
	}
}

impl fmt::Display for SensorType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "S-{}", self.0)
	}
}

/// Error returned when a string is not an `S-<n>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSensorTypeError(String);

impl fmt::Display for ParseSensorTypeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid sensor type tag: {:?}", self.0)
	}
}

impl std::error::Error for ParseSensorTypeError {}

impl FromStr for SensorType {
	type Err = ParseSensorTypeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.strip_prefix("S-")
			.and_then(|n| n.parse().ok())
			.map(SensorType)
			.ok_or_else(|| ParseSensorTypeError(s.to_string()))
	}
}

impl From<SensorType> for String {
	fn from(value: SensorType) -> Self {
		value.to_string()
	}
}

impl TryFrom<String> for SensorType {
	type Error = ParseSensorTypeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// One row of telemetry reported for a single sensor.
///
/// Every field is always present when serialized; values the dashboard leaves
/// blank or unparseable become `null` (temperature, sensor type) or keep the
/// page text verbatim (all other measurements).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
	pub description: String,
	/// Vendor-formatted timestamp, not parsed.
	pub last_activity: String,
	pub status: String,
	pub temperature: Option<f64>,
	pub relative_humidity: String,
	pub absolute_humidity: String,
	pub dew_point: String,
	pub wood_pct: String,
	pub battery_voltage: String,
	pub sensor_type: Option<SensorType>,
	pub sensor_id: String,
	pub site_name: String,
}

impl SensorReading {
	/// Projects the reading onto the fields used for sensor listings.
	pub fn summary(&self) -> SensorSummary {
		SensorSummary {
			description: self.description.clone(),
			sensor_type: self.sensor_type,
			site_name: self.site_name.clone(),
		}
	}
}

/// Reduced sensor record returned by sensor listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSummary {
	pub description: String,
	pub sensor_type: Option<SensorType>,
	pub site_name: String,
}

impl From<&SensorReading> for SensorSummary {
	fn from(reading: &SensorReading) -> Self {
		reading.summary()
	}
}
