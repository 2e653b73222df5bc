//! In-memory source (for testing and demos)

use super::{check_page, DataSource, SourceResult};
use crate::error::SourceError;
use crate::types::RawRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Serves fixed pages. Pages that were never added come back empty, like
/// asking the real API for a page past the end.
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<u32, Vec<RawRecord>>,
    failures: HashMap<u32, SourceError>,
    delays: HashMap<u32, Duration>,
    requests: Mutex<Vec<u32>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for `page`
    pub fn with_page(mut self, page: u32, records: Vec<RawRecord>) -> Self {
        self.pages.insert(page, records);
        self
    }

    /// Make every request for `page` fail with `error`
    pub fn with_failure(mut self, page: u32, error: SourceError) -> Self {
        self.failures.insert(page, error);
        self
    }

    /// Hold the response for `page` back by `delay`
    pub fn with_delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    /// Pages requested so far, in request order
    pub async fn requests(&self) -> Vec<u32> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_page(&self, page: u32) -> SourceResult<Vec<RawRecord>> {
        check_page(page)?;
        self.requests.lock().await.push(page);

        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(error) = self.failures.get(&page) {
            return Err(error.clone());
        }

        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("memory source ({} pages)", self.pages.len())
    }
}
