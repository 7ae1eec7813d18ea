//! HTML extraction for dashboard pages.
//!
//! Extractors are pure functions from page HTML to records. They never fail:
//! unexpected markup degrades to skipped rows, absent values or an empty result.

pub(crate) mod html;
pub mod sensors;
pub mod sites;
pub(crate) mod text;

pub use sensors::{DESCRIPTION_NOT_SET, DESCRIPTION_PLACEHOLDER, UNKNOWN_SITE, extract_sensors};
pub use sites::extract_sites;
