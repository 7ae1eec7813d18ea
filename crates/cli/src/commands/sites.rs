use omnisense::Omnisense;
use tracing::{info, warn};

use crate::error::Result;
use crate::output::{OutputFormat, render_sites};

pub async fn execute(client: &mut Omnisense, format: OutputFormat) -> Result<String> {
	let sites = client.get_site_list().await;
	if sites.is_empty() {
		warn!(target: "omnisense", "no sites found");
	} else {
		info!(target: "omnisense", count = sites.len(), "sites");
	}
	render_sites(&sites, format)
}
