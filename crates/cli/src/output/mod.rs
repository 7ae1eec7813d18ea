//! Rendering of query results for the terminal.

mod format;
mod render;

pub use format::OutputFormat;
pub use render::{render_readings, render_sites, render_summaries};
