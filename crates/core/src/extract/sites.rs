//! Site directory extraction from the site-selection page.

use std::sync::LazyLock;

use omnisense_protocol::SiteDirectory;
use regex_lite::Regex;
use tracing::debug;

use super::html::{block_pattern, elements};

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| block_pattern("a"));
static SHOW_SITE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ShowSiteDetail\('(\d+)'\)").expect("SHOW_SITE_RE should compile"));

/// Maps each `ShowSiteDetail('<id>')` anchor to its visible text, in page order.
///
/// Anchors without a matching click handler are ignored; a page without any
/// yields an empty directory.
pub fn extract_sites(html: &str) -> SiteDirectory {
	let mut sites = SiteDirectory::new();

	for anchor in elements(html, &ANCHOR_RE) {
		let Some(onclick) = anchor.attr("onclick") else {
			continue;
		};
		let Some(caps) = SHOW_SITE_RE.captures(&onclick) else {
			continue;
		};
		sites.insert(&caps[1], anchor.text());
	}

	debug!(target: "omnisense", count = sites.len(), "extracted sites");
	sites
}
