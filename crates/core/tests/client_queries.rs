//! Site and sensor queries through the client facade against the fake browser.

mod common;

use std::sync::{Arc, Mutex};

use common::{LOGIN_HTML, dashboard, init_tracing, sensor_page, sensor_row, valid_credentials};
use omnisense::endpoints::{LOGIN_URL, SITE_LIST_URL, sensor_list_url};
use omnisense::extract::{DESCRIPTION_NOT_SET, UNKNOWN_SITE};
use omnisense::{Error, Omnisense, SensorFilter, SensorType, SessionStatus, SiteSelection};
use omnisense_runtime::fake::{FakeBrowserBuilder, FakeBrowserController};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

fn client(builder: FakeBrowserBuilder) -> (Omnisense, FakeBrowserController) {
	init_tracing();
	let (launcher, controller) = builder.build();
	(Omnisense::new(Arc::new(launcher)), controller)
}

async fn logged_in(builder: FakeBrowserBuilder) -> (Omnisense, FakeBrowserController) {
	let (mut client, controller) = client(builder);
	client.login(valid_credentials()).await.unwrap();
	(client, controller)
}

#[tokio::test]
async fn site_list_is_stable_across_calls() {
	let (mut client, _controller) = logged_in(dashboard()).await;

	let first = client.get_site_list().await;
	let second = client.get_site_list().await;

	assert_eq!(first, second);
	assert_eq!(first.ids().collect::<Vec<_>>(), vec!["10", "20"]);
	assert_eq!(first.name("20"), Some("Barn"));
}

#[tokio::test]
async fn site_list_is_empty_when_login_is_impossible() {
	let (mut client, controller) = client(dashboard());

	assert!(client.get_site_list().await.is_empty());
	assert_eq!(controller.launches(), 0);
}

#[tokio::test]
async fn site_list_is_empty_when_the_page_fails() {
	let (mut client, controller) = logged_in(dashboard()).await;
	controller.fail_page(SITE_LIST_URL, "net::ERR_CONNECTION_RESET");

	assert!(client.get_site_list().await.is_empty());
}

#[tokio::test]
async fn typed_table_rows_become_readings() {
	let (mut client, _controller) = logged_in(dashboard()).await;

	let readings = client.get_sensor_data(Some("10".into()), &SensorFilter::all()).await.unwrap();

	assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["7", "8"]);
	let attic = &readings["7"];
	assert_eq!(attic.sensor_type, Some(SensorType::new(3)));
	assert_eq!(attic.sensor_type.map(|t| t.to_string()).as_deref(), Some("S-3"));
	assert_eq!(attic.site_name, "Home");
	assert_eq!(attic.temperature, Some(21.5));

	let unnamed = &readings["8"];
	assert_eq!(unnamed.description, DESCRIPTION_NOT_SET);
	assert_eq!(unnamed.temperature, None);
	assert_eq!(unnamed.status, "Active");
}

#[tokio::test]
async fn failing_site_is_skipped_and_the_rest_returned() {
	let (mut client, controller) = logged_in(dashboard()).await;
	controller.fail_page(sensor_list_url("20"), "net::ERR_TIMED_OUT");

	let readings = client.get_sensor_data(Some(vec!["10", "20"].into()), &SensorFilter::all()).await.unwrap();

	assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["7", "8"]);
	assert_eq!(client.status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn absent_selection_covers_every_listed_site() {
	let (mut client, controller) = logged_in(dashboard()).await;
	controller.take_events();

	let readings = client.get_sensor_data(None, &SensorFilter::all()).await.unwrap();

	assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["7", "8", "31"]);
	// The barn page has no title, so the listed name is used.
	assert_eq!(readings["31"].site_name, "Barn");
	assert_eq!(controller.navigations(), vec![SITE_LIST_URL.to_string(), sensor_list_url("10"), sensor_list_url("20")]);
}

#[tokio::test]
async fn empty_selection_behaves_like_none() {
	let (mut client, _controller) = logged_in(dashboard()).await;

	let readings = client.get_sensor_data(Some(SiteSelection::Many(Vec::new())), &SensorFilter::all()).await.unwrap();

	assert_eq!(readings.len(), 3);
}

#[tokio::test]
async fn bare_site_id_without_title_has_unknown_site_name() {
	let (mut client, _controller) = logged_in(dashboard()).await;

	let readings = client.get_sensor_data(Some("20".into()), &SensorFilter::all()).await.unwrap();

	assert_eq!(readings["31"].site_name, UNKNOWN_SITE);
	assert_eq!(readings["31"].sensor_type, Some(SensorType::new(1)));
}

#[tokio::test]
async fn sensor_filter_limits_readings() {
	let (mut client, _controller) = logged_in(dashboard()).await;

	let readings = client.get_sensor_data(None, &SensorFilter::only(["31", "7"])).await.unwrap();

	assert_eq!(readings.keys().collect::<Vec<_>>(), vec!["7", "31"]);
}

#[tokio::test]
async fn sensor_list_projects_summaries() {
	let (mut client, _controller) = logged_in(dashboard()).await;

	let summaries = client.get_site_sensor_list(Some("10".into())).await.unwrap();

	assert_eq!(summaries.len(), 2);
	assert_eq!(summaries["7"].description, "Attic");
	assert_eq!(summaries["7"].site_name, "Home");
	assert_eq!(summaries["7"].sensor_type, Some(SensorType::new(3)));
}

#[tokio::test]
async fn sensor_data_without_credentials_is_an_error() {
	let (mut client, controller) = client(dashboard());

	let err = client.get_sensor_data(Some("10".into()), &SensorFilter::all()).await.unwrap_err();

	assert!(matches!(err, Error::InvalidCredentials));
	assert_eq!(controller.launches(), 0);
}

#[tokio::test]
async fn first_query_after_close_logs_in_again() {
	let (mut client, controller) = logged_in(dashboard()).await;
	client.close().await.unwrap();

	let sites = client.get_site_list().await;

	assert_eq!(sites.len(), 2);
	assert_eq!(controller.launches(), 2);
	assert_eq!(client.status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn expired_session_is_replaced_on_the_next_call() {
	let (mut client, controller) = logged_in(dashboard()).await;
	let home = sensor_page(Some("Sensors for Home"), 3, &[sensor_row("7", "Attic", "21.5")]);
	controller.set_page(sensor_list_url("10"), LOGIN_HTML);

	let readings = client.get_sensor_data(Some("10".into()), &SensorFilter::all()).await.unwrap();
	assert!(readings.is_empty());
	assert_eq!(client.status(), SessionStatus::Unauthenticated);
	assert_eq!(controller.open_browsers(), 0);

	controller.set_page(sensor_list_url("10"), home);
	let readings = client.get_sensor_data(Some("10".into()), &SensorFilter::all()).await.unwrap();

	assert_eq!(readings.len(), 1);
	assert_eq!(controller.launches(), 2);
	assert_eq!(controller.navigations().iter().filter(|url| *url == LOGIN_URL).count(), 2);
}

#[tokio::test]
async fn close_on_a_fresh_client_then_login() {
	let (mut client, _controller) = client(dashboard());

	client.close().await.unwrap();
	client.login(valid_credentials()).await.unwrap();

	assert_eq!(client.status(), SessionStatus::Authenticated);
	client.close().await.unwrap();
	assert_eq!(client.status(), SessionStatus::Closed);
}

/// Target and span names (root first) of every event seen.
#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<(String, Vec<String>)>>>);

impl EventLog {
	fn events(&self) -> Vec<(String, Vec<String>)> {
		self.0.lock().unwrap().clone()
	}
}

impl<S> Layer<S> for EventLog
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
		let spans = ctx
			.event_scope(event)
			.map(|scope| scope.from_root().map(|span| span.name().to_string()).collect())
			.unwrap_or_default();
		self.0.lock().unwrap().push((event.metadata().target().to_string(), spans));
	}
}

#[tokio::test]
async fn operations_run_inside_the_injected_span() {
	let log = EventLog::default();
	let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));

	let (launcher, _controller) = dashboard().build();
	let span = tracing::info_span!("dashboard", account = "alice");
	let mut client = Omnisense::new(Arc::new(launcher)).with_span(span);

	client.login(valid_credentials()).await.unwrap();
	assert_eq!(client.get_site_list().await.len(), 2);
	assert_eq!(client.get_sensor_data(Some("10".into()), &SensorFilter::all()).await.unwrap().len(), 2);
	client.close().await.unwrap();

	let events = log.events();
	let targets: Vec<&str> = events.iter().map(|(target, _)| target.as_str()).collect();
	for expected in ["omnisense", "omnisense.session", "omnisense.fetch"] {
		assert!(targets.contains(&expected), "no event under {expected}: {targets:?}");
	}
	for (target, spans) in &events {
		assert_eq!(spans.first().map(String::as_str), Some("dashboard"), "{target} event outside the dashboard span");
	}
}

#[tokio::test]
async fn session_events_are_filterable_by_target() {
	let log = EventLog::default();
	let filter = EnvFilter::new("omnisense.session=debug");
	let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone().with_filter(filter)));

	let (launcher, _controller) = dashboard().build();
	let mut client = Omnisense::new(Arc::new(launcher));
	client.login(valid_credentials()).await.unwrap();
	client.get_site_list().await;
	client.close().await.unwrap();

	let events = log.events();
	assert!(!events.is_empty());
	assert!(events.iter().all(|(target, _)| target == "omnisense.session"));
}
