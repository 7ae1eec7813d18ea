//! Site and sensor selection arguments.

use indexmap::IndexSet;
use omnisense_protocol::SiteDirectory;
use serde_json::Value;

use crate::error::Error;

/// Which sites an operation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
	/// One site id.
	Single(String),
	/// Site ids in the order given.
	Many(Vec<String>),
	/// A directory, typically from `get_site_list`; its ids are used and its names serve as hints.
	Named(SiteDirectory),
}

impl SiteSelection {
	/// Ordered, de-duplicated site ids. Blank ids are dropped.
	pub fn normalize(&self) -> IndexSet<String> {
		let ids: Box<dyn Iterator<Item = &str> + '_> = match self {
			SiteSelection::Single(id) => Box::new(std::iter::once(id.as_str())),
			SiteSelection::Many(ids) => Box::new(ids.iter().map(String::as_str)),
			SiteSelection::Named(directory) => Box::new(directory.ids()),
		};
		ids.map(str::trim).filter(|id| !id.is_empty()).map(str::to_string).collect()
	}

	/// `true` when no usable id is selected, which callers treat as "all sites".
	pub fn is_empty(&self) -> bool {
		self.normalize().is_empty()
	}

	/// Display name known for `site_id` without fetching anything.
	pub fn name_hint(&self, site_id: &str) -> Option<&str> {
		match self {
			SiteSelection::Named(directory) => directory.name(site_id),
			_ => None,
		}
	}
}

impl From<&str> for SiteSelection {
	fn from(id: &str) -> Self {
		SiteSelection::Single(id.to_string())
	}
}

impl From<String> for SiteSelection {
	fn from(id: String) -> Self {
		SiteSelection::Single(id)
	}
}

impl From<Vec<String>> for SiteSelection {
	fn from(ids: Vec<String>) -> Self {
		SiteSelection::Many(ids)
	}
}

impl From<Vec<&str>> for SiteSelection {
	fn from(ids: Vec<&str>) -> Self {
		SiteSelection::Many(ids.into_iter().map(str::to_string).collect())
	}
}

impl From<SiteDirectory> for SiteSelection {
	fn from(directory: SiteDirectory) -> Self {
		SiteSelection::Named(directory)
	}
}

/// Accepts a string, an array of strings, or an object mapping ids to names.
impl TryFrom<Value> for SiteSelection {
	type Error = Error;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::String(id) => Ok(SiteSelection::Single(id)),
			Value::Array(items) => items
				.into_iter()
				.map(|item| match item {
					Value::String(id) => Ok(id),
					other => Err(Error::UnsupportedSiteIds(json_kind(&other))),
				})
				.collect::<Result<Vec<_>, _>>()
				.map(SiteSelection::Many),
			Value::Object(entries) => entries
				.into_iter()
				.map(|(id, name)| match name {
					Value::String(name) => Ok((id, name)),
					other => Err(Error::UnsupportedSiteIds(json_kind(&other))),
				})
				.collect::<Result<SiteDirectory, _>>()
				.map(SiteSelection::Named),
			other => Err(Error::UnsupportedSiteIds(json_kind(&other))),
		}
	}
}

/// Sensor ids to keep; empty keeps every sensor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorFilter(IndexSet<String>);

impl SensorFilter {
	/// A filter that keeps every sensor.
	pub fn all() -> Self {
		Self::default()
	}

	pub fn only<I, S>(ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(ids.into_iter().map(Into::into).filter(|id: &String| !id.is_empty()).collect())
	}

	pub fn allows(&self, sensor_id: &str) -> bool {
		self.0.is_empty() || self.0.contains(sensor_id)
	}

	pub fn is_unrestricted(&self) -> bool {
		self.0.is_empty()
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

impl From<&str> for SensorFilter {
	fn from(id: &str) -> Self {
		Self::only([id])
	}
}

impl From<Vec<String>> for SensorFilter {
	fn from(ids: Vec<String>) -> Self {
		Self::only(ids)
	}
}

/// Accepts a string or an array of strings.
impl TryFrom<Value> for SensorFilter {
	type Error = Error;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::String(id) => Ok(Self::only([id])),
			Value::Array(items) => items
				.into_iter()
				.map(|item| match item {
					Value::String(id) => Ok(id),
					other => Err(Error::UnsupportedSensorIds(json_kind(&other))),
				})
				.collect::<Result<Vec<_>, _>>()
				.map(Self::only),
			other => Err(Error::UnsupportedSensorIds(json_kind(&other))),
		}
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
