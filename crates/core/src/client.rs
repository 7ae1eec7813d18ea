//! High-level dashboard client.

use std::sync::Arc;

use omnisense_protocol::{SensorMap, SensorSummaryMap, SiteDirectory};
use omnisense_runtime::BrowserLauncher;
use tracing::{Instrument, Span, debug, error, info, info_span};

use crate::config::{Credentials, SessionConfig};
use crate::endpoints::{SITE_LIST_URL, sensor_list_url};
use crate::error::Result;
use crate::extract::{extract_sensors, extract_sites};
use crate::fetch::PageFetcher;
use crate::selection::{SensorFilter, SiteSelection};
use crate::session::{SessionManager, SessionStatus};

/// Client for one Omnisense dashboard account.
///
/// Every data call logs in lazily with the stored credentials when no session
/// is live. Calls take `&mut self` and run one page fetch at a time; use one
/// client per concurrent caller.
///
/// ```ignore
/// let mut client = Omnisense::new(Arc::new(ChromiumLauncher));
/// client.login(Credentials::new("user", "secret")).await?;
/// let sites = client.get_site_list().await;
/// let readings = client.get_sensor_data(Some(sites.into()), &SensorFilter::all()).await?;
/// client.close().await?;
/// ```
pub struct Omnisense {
	session: SessionManager,
	fetcher: PageFetcher,
	span: Span,
}

impl Omnisense {
	pub fn new(launcher: Arc<dyn BrowserLauncher>) -> Self {
		Self::with_config(launcher, SessionConfig::default())
	}

	pub fn with_config(launcher: Arc<dyn BrowserLauncher>, config: SessionConfig) -> Self {
		let fetcher = PageFetcher::new(config.navigation_timeout);
		Self {
			session: SessionManager::new(launcher, config),
			fetcher,
			span: info_span!(target: "omnisense", "omnisense"),
		}
	}

	/// Runs every operation of this client inside `span`.
	pub fn with_span(mut self, span: Span) -> Self {
		self.span = span;
		self
	}

	pub fn status(&self) -> SessionStatus {
		self.session.status()
	}

	pub fn session(&self) -> &SessionManager {
		&self.session
	}

	/// Stores `credentials` and logs in, replacing any live session.
	pub async fn login(&mut self, credentials: Credentials) -> Result<()> {
		let span = self.span.clone();
		self.session.login(Some(credentials)).instrument(span).await
	}

	/// Releases the browser. Safe to call repeatedly; a later call logs in again.
	pub async fn close(&mut self) -> Result<()> {
		let span = self.span.clone();
		self.session.close().instrument(span).await
	}

	/// Site ids and names visible to the account.
	///
	/// Never fails: a login or fetch error is logged and yields an empty directory.
	pub async fn get_site_list(&mut self) -> SiteDirectory {
		let span = self.span.clone();
		self.site_directory().instrument(span).await
	}

	/// Readings for every sensor at the selected sites.
	///
	/// `None` or an empty selection covers every site in [`Self::get_site_list`].
	/// Session failures are returned; a site whose page cannot be fetched is
	/// logged with its id and skipped.
	pub async fn get_sensor_data(&mut self, sites: Option<SiteSelection>, sensors: &SensorFilter) -> Result<SensorMap> {
		let span = self.span.clone();
		async move {
			self.session.ensure_authenticated().await?;

			let sites = match sites {
				Some(selection) if !selection.is_empty() => selection,
				_ => {
					debug!(target: "omnisense", "no sites selected; using site list");
					SiteSelection::Named(self.site_directory().await)
				}
			};

			let mut readings = SensorMap::new();
			for site_id in sites.normalize() {
				let url = sensor_list_url(&site_id);
				match self.fetch(&url).await {
					Ok(html) => {
						let found = extract_sensors(&html, sites.name_hint(&site_id), sensors);
						debug!(target: "omnisense", %site_id, count = found.len(), "site sensors");
						readings.extend(found);
					}
					Err(err) => {
						error!(target: "omnisense", %site_id, error = %err, "error fetching sensor data");
					}
				}
			}

			info!(target: "omnisense", count = readings.len(), "sensor data collected");
			Ok(readings)
		}
		.instrument(span)
		.await
	}

	/// Description, type and site of every sensor at the selected sites.
	pub async fn get_site_sensor_list(&mut self, sites: Option<SiteSelection>) -> Result<SensorSummaryMap> {
		let readings = self.get_sensor_data(sites, &SensorFilter::all()).await?;
		Ok(readings.iter().map(|(id, reading)| (id.clone(), reading.summary())).collect())
	}

	async fn site_directory(&mut self) -> SiteDirectory {
		match self.fetch(SITE_LIST_URL).await {
			Ok(html) => extract_sites(&html),
			Err(err) => {
				error!(target: "omnisense", error = %err, "error getting site list");
				SiteDirectory::new()
			}
		}
	}

	async fn fetch(&mut self, url: &str) -> Result<String> {
		self.fetcher.fetch(&mut self.session, url).await
	}
}
