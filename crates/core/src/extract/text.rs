//! Shared text cleanup helpers.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("TAG_RE should compile"));
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_RE should compile"));
static NUMERIC_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&#(x[0-9a-f]+|[0-9]+);").expect("NUMERIC_ENTITY_RE should compile"));

/// Decode named entities the dashboard emits plus numeric character references.
pub(crate) fn decode_html_entities(s: &str) -> String {
	if !s.contains('&') {
		return s.to_string();
	}

	let named = s
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&apos;", "'")
		.replace("&nbsp;", " ");
	let numeric = NUMERIC_ENTITY_RE.replace_all(&named, |caps: &Captures<'_>| {
		let code = &caps[1];
		let value = match code.strip_prefix(['x', 'X']) {
			Some(hex) => u32::from_str_radix(hex, 16).ok(),
			None => code.parse().ok(),
		};
		value.and_then(char::from_u32).map(String::from).unwrap_or_else(|| caps[0].to_string())
	});
	// Last, so `&amp;lt;` stays `&lt;`.
	numeric.replace("&amp;", "&")
}

/// Visible text of an HTML fragment.
///
/// Tags and comments are dropped, every text run between tags is decoded and
/// trimmed, and the non-empty runs are concatenated without separators.
pub(crate) fn visible_text(fragment: &str) -> String {
	let without_comments = COMMENT_RE.replace_all(fragment, "");
	TAG_RE
		.split(&without_comments)
		.map(decode_html_entities)
		.filter_map(|run| {
			let trimmed = run.trim();
			(!trimmed.is_empty()).then(|| trimmed.to_string())
		})
		.collect()
}

/// Text of a fragment with tags removed and surrounding whitespace trimmed.
pub(crate) fn plain_text(fragment: &str) -> String {
	let without_comments = COMMENT_RE.replace_all(fragment, "");
	let stripped = TAG_RE.replace_all(&without_comments, "");
	decode_html_entities(&stripped).trim().to_string()
}
