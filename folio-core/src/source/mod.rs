//! Catalog data sources
//!
//! A source turns a page number into the records of that page. The HTTP
//! source talks to the public books API; the memory source serves fixed
//! pages and is what tests and demos run against.

mod http;
mod memory;

pub use http::{HttpSource, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use memory::MemorySource;

use crate::error::SourceError;
use crate::types::RawRecord;
use async_trait::async_trait;
use serde::Deserialize;

/// Result type for source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Paginated supplier of catalog records
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch one page (1-indexed), records in API order
    async fn fetch_page(&self, page: u32) -> SourceResult<Vec<RawRecord>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Reject page 0 before any request goes out
pub(crate) fn check_page(page: u32) -> SourceResult<()> {
    if page == 0 {
        Err(SourceError::InvalidPage(page))
    } else {
        Ok(())
    }
}

/// Parse a books API response body.
///
/// The records live at `data.data`. A body that is not JSON is a fetch
/// failure; JSON without that array, or with entries that are not records
/// with an id, is an invalid response. Missing or `null` details inside a
/// record are fine and fall back at display time.
pub fn parse_page(body: &str) -> SourceResult<Vec<RawRecord>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SourceError::Fetch(format!("response body is not JSON: {}", e)))?;

    let items = value
        .get("data")
        .and_then(|data| data.get("data"))
        .ok_or_else(|| SourceError::InvalidResponse("missing data.data".to_string()))?;

    let items = items
        .as_array()
        .ok_or_else(|| SourceError::InvalidResponse("data.data is not an array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            RawRecord::deserialize(item).map_err(|e| {
                SourceError::InvalidResponse(format!("record {} is malformed: {}", i, e))
            })
        })
        .collect()
}
