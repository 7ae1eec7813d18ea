//! Login-page recognition.

/// Decides whether a rendered page is the dashboard's login page.
///
/// Used after submitting credentials (still on the login page means the
/// credentials were rejected) and after each fetch (landing on it means the
/// session has ended). Closures taking `(url, html)` implement this trait.
pub trait LoginDetector: Send + Sync {
	fn is_login_page(&self, url: &str, html: &str) -> bool;
}

impl<F> LoginDetector for F
where
	F: Fn(&str, &str) -> bool + Send + Sync,
{
	fn is_login_page(&self, url: &str, html: &str) -> bool {
		self(url, html)
	}
}

/// Recognizes the login page by its path or by a marker in its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPageDetector {
	/// Matched case-insensitively against the URL.
	pub path_marker: String,
	/// Matched against the rendered HTML.
	pub content_marker: String,
}

impl Default for LoginPageDetector {
	fn default() -> Self {
		Self {
			path_marker: "user_login.asp".to_string(),
			content_marker: "User Log-In".to_string(),
		}
	}
}

impl LoginDetector for LoginPageDetector {
	fn is_login_page(&self, url: &str, html: &str) -> bool {
		url.to_ascii_lowercase().contains(&self.path_marker.to_ascii_lowercase()) || html.contains(&self.content_marker)
	}
}
