//! Data types for the Omnisense dashboard.
//!
//! This crate contains the serde-serializable records produced by scraping the
//! vendor dashboard: the site directory and the per-sensor readings.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization and small accessors
//! * Schema-total: Every reading carries the same fixed set of fields
//! * Fresh: Records are built per fetch and never cached or diffed
//!
//! Session handling and HTML extraction live in `omnisense-rs`.

pub mod sensor;
pub mod site;

pub use sensor::*;
pub use site::*;
