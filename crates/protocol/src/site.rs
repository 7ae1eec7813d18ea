//! Site directory types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A vendor-defined location grouping one or more sensors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Site {
	/// Vendor-assigned numeric id, kept as text.
	pub id: String,
	/// Display name shown on the site-selection page.
	pub name: String,
}

impl Site {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self { id: id.into(), name: name.into() }
	}
}

/// Ordered mapping of site id to display name.
///
/// Iteration follows the order sites were inserted, which for extracted
/// directories is the order they appear on the source page. Re-inserting an
/// existing id replaces its name but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteDirectory(IndexMap<String, String>);

impl SiteDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a site, returning the previous name for the id if any.
	pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) -> Option<String> {
		self.0.insert(id.into(), name.into())
	}

	pub fn name(&self, id: &str) -> Option<&str> {
		self.0.get(id).map(String::as_str)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.0.contains_key(id)
	}

	/// Site ids in directory order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// `(id, name)` pairs in directory order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(id, name)| (id.as_str(), name.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<Site> for SiteDirectory {
	fn from_iter<I: IntoIterator<Item = Site>>(iter: I) -> Self {
		let mut directory = Self::new();
		for site in iter {
			directory.insert(site.id, site.name);
		}
		directory
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SiteDirectory {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut directory = Self::new();
		for (id, name) in iter {
			directory.insert(id, name);
		}
		directory
	}
}

impl IntoIterator for SiteDirectory {
	type Item = Site;
	type IntoIter = std::iter::Map<indexmap::map::IntoIter<String, String>, fn((String, String)) -> Site>;

	fn into_iter(self) -> Self::IntoIter {
		let to_site: fn((String, String)) -> Site = |(id, name)| Site { id, name };
		self.0.into_iter().map(to_site)
	}
}
