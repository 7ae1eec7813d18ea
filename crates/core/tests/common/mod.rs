//! Shared fixtures for driving the client against the fake browser.

#![allow(dead_code)]

use omnisense::Credentials;
use omnisense::endpoints::{LOGIN_URL, PASSWORD_FIELD, SITE_LIST_URL, SUBMIT_BUTTON, USERNAME_FIELD, sensor_list_url};
use omnisense_runtime::fake::{FakeBrowserBuilder, FakeLoginForm};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";

pub const LOGIN_HTML: &str = r#"<html><head><title>Omnisense</title></head><body>
<h2>User Log-In</h2>
<form method="post" action="user_login.asp">
<input type="text" name="userId"><input type="password" name="userPass">
<button name="btnAct" value="login">Log In</button>
</form></body></html>"#;

pub const SITE_LIST_HTML: &str = r##"<html><head><title>Select Site</title></head><body>
<table class="table">
<tr><td><a href="#" onclick="ShowSiteDetail('10')">Home</a></td><td>3 sensors</td></tr>
<tr><td><a href="#" onclick="ShowSiteDetail('20')">Barn</a></td><td>1 sensor</td></tr>
<tr><td><a href="logout.asp">Log out</a></td></tr>
</table></body></html>"##;

pub fn valid_credentials() -> Credentials {
	Credentials::new(USERNAME, PASSWORD)
}

pub fn sensor_row(id: &str, description: &str, temperature: &str) -> String {
	format!(
		r#"<tr class="sensorTable"><td>{id}</td><td>{description}</td><td>2024-03-01 08:15</td><td>Active</td><td>{temperature}</td><td>48</td><td>7.2</td><td>3.9</td><td>12</td><td>3.05</td></tr>"#
	)
}

/// A sensor page with one typed table holding `rows`.
pub fn sensor_page(title: Option<&str>, sensor_type: u32, rows: &[String]) -> String {
	let head = title.map(|t| format!("<head><title>{t}</title></head>")).unwrap_or_default();
	format!(
		r#"<html>{head}<body><table id="sensorType{sensor_type}" class="sortable table"><caption>Sensor Type {sensor_type}</caption>
<tr><th>ID</th><th>Description</th></tr>{}</table></body></html>"#,
		rows.concat()
	)
}

pub fn login_form() -> FakeLoginForm {
	FakeLoginForm::new(USERNAME_FIELD, PASSWORD_FIELD, SUBMIT_BUTTON, SITE_LIST_URL).accepts(USERNAME, PASSWORD)
}

/// Login page, site list and one sensor page per site (`10` typed `S-3`, `20` typed `S-1`).
pub fn dashboard() -> FakeBrowserBuilder {
	FakeBrowserBuilder::new()
		.page(LOGIN_URL, LOGIN_HTML)
		.page(SITE_LIST_URL, SITE_LIST_HTML)
		.page(
			sensor_list_url("10"),
			sensor_page(Some("Sensors for Home"), 3, &[sensor_row("7", "Attic", "21.5"), sensor_row("8", "~click to edit~", "--")]),
		)
		.page(sensor_list_url("20"), sensor_page(None, 1, &[sensor_row("31", "Hay loft", "4.0")]))
		.login_form(login_form())
}

/// Installs a test-writer subscriber honoring `RUST_LOG`; repeated calls are no-ops.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
