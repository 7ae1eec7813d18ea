//! Element scanning over server-rendered HTML.
//!
//! The dashboard pages are machine-generated markup, so elements are located
//! with per-tag patterns rather than a full DOM. Tags that nest inside
//! themselves, like layout tables, go through [`nested_elements`].

use std::sync::LazyLock;

use regex_lite::Regex;

use super::text::{decode_html_entities, plain_text, visible_text};

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).expect("ATTR_RE should compile")
});
static CELL_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<td\b([^>]*)>").expect("CELL_OPEN_RE should compile"));
static CELL_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</td\s*>").expect("CELL_CLOSE_RE should compile"));

/// Pattern matching `<tag ...>inner</tag>` blocks, capturing attributes and inner HTML.
pub(crate) fn block_pattern(tag: &str) -> Regex {
	Regex::new(&format!(r"(?is)<{tag}\b([^>]*)>(.*?)</{tag}\s*>")).expect("block pattern should compile")
}

/// An element located in a page: its raw attribute text and inner HTML.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Element<'a> {
	attrs: &'a str,
	inner: &'a str,
}

impl<'a> Element<'a> {
	/// Decoded value of attribute `name`; `Some("")` for a bare attribute.
	pub(crate) fn attr(&self, name: &str) -> Option<String> {
		ATTR_RE.captures_iter(self.attrs).find_map(|caps| {
			let key = caps.get(1)?.as_str();
			if !key.eq_ignore_ascii_case(name) {
				return None;
			}
			let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
			Some(decode_html_entities(value))
		})
	}

	pub(crate) fn has_class(&self, class: &str) -> bool {
		self.attr("class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	pub(crate) fn inner_html(&self) -> &'a str {
		self.inner
	}

	/// Trimmed text runs concatenated, as cell values are read.
	pub(crate) fn text(&self) -> String {
		visible_text(self.inner)
	}

	/// Whole text content with inner spacing preserved.
	pub(crate) fn plain_text(&self) -> String {
		plain_text(self.inner)
	}
}

/// All non-overlapping elements matched by a [`block_pattern`].
pub(crate) fn elements<'a>(html: &'a str, pattern: &Regex) -> Vec<Element<'a>> {
	pattern
		.captures_iter(html)
		.filter_map(|caps| {
			Some(Element {
				attrs: caps.get(1)?.as_str(),
				inner: caps.get(2)?.as_str(),
			})
		})
		.collect()
}

/// Opening and closing `tag` tags, capturing the closing slash and attributes.
pub(crate) fn tag_pattern(tag: &str) -> Regex {
	Regex::new(&format!(r"(?i)<(/?){tag}\b([^>]*)>")).expect("tag pattern should compile")
}

/// Every element matched by a [`tag_pattern`], nested ones included, in document order.
///
/// Each opening tag is paired with the closing tag at the same depth, so an
/// element keeps everything nested inside it. Unclosed tags are dropped and
/// stray closing tags are ignored.
pub(crate) fn nested_elements<'a>(html: &'a str, pattern: &Regex) -> Vec<Element<'a>> {
	let mut open: Vec<(usize, &'a str, usize)> = Vec::new();
	let mut found: Vec<(usize, Element<'a>)> = Vec::new();

	for caps in pattern.captures_iter(html) {
		let (Some(whole), Some(slash), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2)) else {
			continue;
		};
		if slash.as_str().is_empty() {
			open.push((whole.start(), attrs.as_str(), whole.end()));
		} else if let Some((start, attrs, inner_start)) = open.pop() {
			found.push((
				start,
				Element {
					attrs,
					inner: &html[inner_start..whole.start()],
				},
			));
		}
	}

	found.sort_by_key(|(start, _)| *start);
	found.into_iter().map(|(_, element)| element).collect()
}

/// Data cells of a table row.
///
/// A cell runs from its `<td>` to its `</td>`, or to the next `<td>` when the
/// closing tag is omitted.
pub(crate) fn cells(row_inner: &str) -> Vec<Element<'_>> {
	let opens: Vec<_> = CELL_OPEN_RE.captures_iter(row_inner).collect();
	let mut cells = Vec::with_capacity(opens.len());

	for (i, caps) in opens.iter().enumerate() {
		let (Some(whole), Some(attrs)) = (caps.get(0), caps.get(1)) else {
			continue;
		};
		let end = opens.get(i + 1).and_then(|next| next.get(0)).map_or(row_inner.len(), |m| m.start());
		let mut inner = &row_inner[whole.end()..end];
		if let Some(close) = CELL_CLOSE_RE.find(inner) {
			inner = &inner[..close.start()];
		}
		cells.push(Element { attrs: attrs.as_str(), inner });
	}

	cells
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_quoted_unquoted_and_bare_attributes() {
		let anchors = block_pattern("a");
		let html = r#"<a href=/x onclick="ShowSiteDetail('12')" data-x='y' hidden>Site</a>"#;
		let found = elements(html, &anchors);

		assert_eq!(found.len(), 1);
		assert_eq!(found[0].attr("href").as_deref(), Some("/x"));
		assert_eq!(found[0].attr("ONCLICK").as_deref(), Some("ShowSiteDetail('12')"));
		assert_eq!(found[0].attr("data-x").as_deref(), Some("y"));
		assert_eq!(found[0].attr("hidden").as_deref(), Some(""));
		assert_eq!(found[0].attr("title"), None);
	}

	#[test]
	fn class_membership_is_per_token() {
		let tables = block_pattern("table");
		let html = r#"<table class="sortable table-striped"></table><table class=" table  sortable "></table>"#;
		let found = elements(html, &tables);

		assert!(!found[0].has_class("table"));
		assert!(found[1].has_class("table"));
		assert!(found[1].has_class("sortable"));
	}

	#[test]
	fn block_pattern_ignores_longer_tag_names() {
		let anchors = block_pattern("a");
		assert!(elements("<abbr>x</abbr><area>", &anchors).is_empty());
	}

	#[test]
	fn nested_elements_pair_tags_by_depth() {
		let tables = tag_pattern("table");
		let html = r#"<table id="outer"><tr><td><table id="inner"><tr><td>1</td></tr></table></td><td>after</td></tr></table><TABLE id=last></TABLE >"#;
		let found = nested_elements(html, &tables);

		let ids: Vec<_> = found.iter().filter_map(|t| t.attr("id")).collect();
		assert_eq!(ids, vec!["outer", "inner", "last"]);
		assert!(found[0].inner_html().contains(r#"<table id="inner">"#));
		assert!(found[0].inner_html().ends_with("<td>after</td></tr>"));
		assert_eq!(found[1].inner_html(), "<tr><td>1</td></tr>");
		assert_eq!(found[2].inner_html(), "");
	}

	#[test]
	fn nested_elements_skip_unbalanced_tags() {
		let tables = tag_pattern("table");
		let found = nested_elements("</table><table id=a><table id=b></table><tablex>", &tables);

		assert_eq!(found.len(), 1);
		assert_eq!(found[0].attr("id").as_deref(), Some("b"));
	}

	#[test]
	fn cells_tolerate_missing_close_tags() {
		let row = "<td>1</td><td class=d>Desc<td> 3 </td>";
		let found = cells(row);

		assert_eq!(found.len(), 3);
		assert_eq!(found[1].text(), "Desc");
		assert!(found[1].has_class("d"));
		assert_eq!(found[2].text(), "3");
	}
}
