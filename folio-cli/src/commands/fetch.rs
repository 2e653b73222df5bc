//! Fetch command implementation

use anyhow::{Context, Result};
use folio_core::DataSource;

/// Request one page and print its raw records as JSON
pub async fn fetch(api_url: &str, timeout_secs: u64, page: u32) -> Result<()> {
    let source = super::http_source(api_url, timeout_secs)?;

    let records = source
        .fetch_page(page)
        .await
        .with_context(|| format!("Failed to fetch page {} from {}", page, api_url))?;

    tracing::info!("Page {} returned {} records", page, records.len());
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
