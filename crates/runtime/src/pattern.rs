//! URL patterns for navigation waits.
//!
//! Patterns follow the browser-automation convention: a string containing
//! glob metacharacters (`*`, `?`, `[`) is matched as a glob over the full URL,
//! where `**` spans any number of path segments; anything else must equal the
//! URL exactly.

use std::fmt;

use glob::{MatchOptions, Pattern, PatternError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
	case_sensitive: true,
	require_literal_separator: false,
	require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
pub enum UrlPattern {
	Exact(String),
	Glob(Pattern),
}

impl UrlPattern {
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		if pattern.contains(['*', '?', '[']) {
			Pattern::new(pattern).map(UrlPattern::Glob)
		} else {
			Ok(UrlPattern::Exact(pattern.to_string()))
		}
	}

	pub fn matches(&self, url: &str) -> bool {
		match self {
			UrlPattern::Exact(expected) => expected == url,
			UrlPattern::Glob(pattern) => pattern.matches_with(url, MATCH_OPTIONS),
		}
	}
}

impl fmt::Display for UrlPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UrlPattern::Exact(url) => f.write_str(url),
			UrlPattern::Glob(pattern) => f.write_str(pattern.as_str()),
		}
	}
}
