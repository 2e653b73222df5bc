//! CLI command implementations

mod browse;
mod fetch;

pub use browse::{browse, BrowseOptions};
pub use fetch::fetch;

use anyhow::{Context, Result};
use folio_core::HttpSource;
use std::time::Duration;

/// HTTP source shared by both commands
fn http_source(api_url: &str, timeout_secs: u64) -> Result<HttpSource> {
    HttpSource::new(api_url, Duration::from_secs(timeout_secs))
        .with_context(|| format!("Failed to set up catalog source for {}", api_url))
}
