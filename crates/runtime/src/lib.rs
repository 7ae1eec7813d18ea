//! Headless browser collaborator for the Omnisense client.
//!
//! The client never talks to a browser directly. It asks a [`BrowserLauncher`]
//! for a [`PageDriver`] and drives that single page through login and page
//! fetches. Two launchers ship with this crate:
//!
//! * [`ChromiumLauncher`]: a real headless Chromium over the DevTools protocol
//! * [`fake::FakeBrowserBuilder`]: an in-memory scripted browser for tests

pub mod chromium;
pub mod driver;
pub mod error;
pub mod fake;
pub mod options;
pub mod pattern;

pub use chromium::ChromiumLauncher;
pub use driver::{BrowserLauncher, PageDriver};
pub use error::{DriverError, Result};
pub use options::LaunchOptions;
pub use pattern::UrlPattern;
