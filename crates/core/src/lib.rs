//! Client for the Omnisense wireless sensor dashboard.
//!
//! The dashboard has no API, so this crate drives a headless browser through
//! the vendor login form and scrapes the server-rendered pages:
//!
//! * [`Omnisense`] is the entry point: log in, list sites, fetch readings
//! * [`session`] holds the login state machine behind every call
//! * [`extract`] turns page HTML into [`SiteDirectory`] and [`SensorMap`] records
//!
//! The browser itself is injected as an [`omnisense_runtime::BrowserLauncher`];
//! use [`omnisense_runtime::ChromiumLauncher`] in production and
//! [`omnisense_runtime::fake`] in tests.
//!
//! Nothing here installs a tracing subscriber. Events are emitted under the
//! `omnisense`, `omnisense.session` and `omnisense.fetch` targets inside the
//! span given to [`Omnisense::with_span`].

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod selection;
pub mod session;

pub use client::Omnisense;
pub use config::{Credentials, DEFAULT_TIMEOUT, SessionConfig};
pub use error::{Error, Result};
pub use extract::{extract_sensors, extract_sites};
pub use fetch::PageFetcher;
pub use omnisense_protocol::{SensorMap, SensorReading, SensorSummary, SensorSummaryMap, SensorType, Site, SiteDirectory};
pub use selection::{SensorFilter, SiteSelection};
pub use session::{LoginDetector, LoginPageDetector, SessionManager, SessionStatus};
