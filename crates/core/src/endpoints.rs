//! Fixed dashboard endpoints and login form selectors.

use std::sync::LazyLock;

use omnisense_runtime::UrlPattern;

pub const HOST_URL: &str = "https://www.omnisense.com";
pub const LOGIN_URL: &str = "https://www.omnisense.com/user_login.asp";
pub const SITE_LIST_URL: &str = "https://www.omnisense.com/site_select.asp";
pub const SENSOR_LIST_URL: &str = "https://www.omnisense.com/sensor_select.asp";

pub const USERNAME_FIELD: &str = r#"input[name="userId"]"#;
pub const PASSWORD_FIELD: &str = r#"input[name="userPass"]"#;
pub const SUBMIT_BUTTON: &str = r#"button[name="btnAct"]"#;

/// Where the dashboard redirects after a successful login.
pub static LANDING_PATTERN: LazyLock<UrlPattern> = LazyLock::new(|| UrlPattern::new("**/site_select.asp").expect("LANDING_PATTERN should compile"));

/// Sensor-selection page for one site.
pub fn sensor_list_url(site_id: &str) -> String {
	format!("{SENSOR_LIST_URL}?siteNbr={site_id}")
}
