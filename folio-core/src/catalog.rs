//! Catalog controller: owns the collection and everything the triggers change

use crate::collection::CollectionStore;
use crate::display::{render, RenderFrame};
use crate::error::PageError;
use crate::query::ViewQuery;
use crate::source::DataSource;
use crate::types::{RawRecord, ViewMode};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Next page to request. Starts at 1 and only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl PageCursor {
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Move to the next page and return it
    pub fn advance(&mut self) -> u32 {
        self.current = self.current.saturating_add(1);
        self.current
    }
}

/// Mutable state behind the catalog
#[derive(Debug, Default)]
pub struct CatalogState {
    pub store: CollectionStore,
    pub cursor: PageCursor,
    pub query: ViewQuery,
    pub mode: ViewMode,
}

impl CatalogState {
    fn frame_for(&self, query: &ViewQuery) -> RenderFrame {
        let view = query.apply(self.store.records());
        render(&view, self.mode, self.store.len())
    }
}

/// Result of a successful page load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageOutcome {
    pub page: u32,
    /// Records from this page that were new
    pub added: usize,
    /// Collection size afterwards
    pub total: usize,
}

/// Single owner of the collection, cursor, active query and view mode.
///
/// Page loads go through a gate so only one fetch is in flight at a time and
/// pages land in the order they were requested. Queries never wait on the
/// gate; they see whatever has been ingested so far.
pub struct Catalog {
    source: Arc<dyn DataSource>,
    state: RwLock<CatalogState>,
    fetch_gate: Mutex<()>,
}

impl Catalog {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            state: RwLock::new(CatalogState::default()),
            fetch_gate: Mutex::new(()),
        }
    }

    /// Load the page the cursor points at (page 1 on a fresh catalog)
    pub async fn load_current_page(&self) -> Result<PageOutcome, PageError> {
        let _gate = self.fetch_gate.lock().await;
        let page = self.state.read().await.cursor.current();
        self.fetch_and_ingest(page).await
    }

    /// Advance the cursor and load that page.
    ///
    /// The cursor stays advanced even when the fetch fails.
    pub async fn load_next_page(&self) -> Result<PageOutcome, PageError> {
        let _gate = self.fetch_gate.lock().await;
        let page = self.state.write().await.cursor.advance();
        self.fetch_and_ingest(page).await
    }

    /// Caller must hold the fetch gate
    async fn fetch_and_ingest(&self, page: u32) -> Result<PageOutcome, PageError> {
        let records = match self.source.fetch_page(page).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    "Failed to load page {} from {}: {}",
                    page,
                    self.source.describe(),
                    e
                );
                return Err(PageError { page, error: e });
            }
        };

        let fetched = records.len();
        let mut state = self.state.write().await;
        let added = state.store.ingest(records);
        let total = state.store.len();
        tracing::info!(
            "Loaded page {}: {} records, {} new, {} total",
            page,
            fetched,
            added,
            total
        );

        Ok(PageOutcome { page, added, total })
    }

    /// Replace the active search/sort
    pub async fn set_query(&self, query: ViewQuery) {
        tracing::debug!(?query, "View query changed");
        self.state.write().await.query = query;
    }

    pub async fn query(&self) -> ViewQuery {
        self.state.read().await.query.clone()
    }

    /// Switch between grid and list; returns the new mode
    pub async fn toggle_mode(&self) -> ViewMode {
        let mut state = self.state.write().await;
        state.mode = state.mode.toggled();
        state.mode
    }

    pub async fn mode(&self) -> ViewMode {
        self.state.read().await.mode
    }

    /// Frame for the active query
    pub async fn frame(&self) -> RenderFrame {
        let state = self.state.read().await;
        state.frame_for(&state.query)
    }

    /// Frame for an ad-hoc query; the active one is left alone
    pub async fn frame_for(&self, query: &ViewQuery) -> RenderFrame {
        self.state.read().await.frame_for(query)
    }

    /// Snapshot of the collection in arrival order
    pub async fn records(&self) -> Vec<RawRecord> {
        self.state.read().await.store.records().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.store.is_empty()
    }

    /// Page the cursor points at
    pub async fn current_page(&self) -> u32 {
        self.state.read().await.cursor.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn test_cursor_starts_at_one() {
        let mut cursor = PageCursor::default();
        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.advance(), 2);
        assert_eq!(cursor.advance(), 3);
        assert_eq!(cursor.current(), 3);
    }

    #[tokio::test]
    async fn test_toggle_mode() {
        let catalog = Catalog::new(Arc::new(MemorySource::new()));
        assert_eq!(catalog.mode().await, ViewMode::Grid);
        assert_eq!(catalog.toggle_mode().await, ViewMode::List);
        assert_eq!(catalog.frame().await.mode, ViewMode::List);
        assert_eq!(catalog.toggle_mode().await, ViewMode::Grid);
    }

    #[tokio::test]
    async fn test_empty_page_past_the_end() {
        let source = MemorySource::new().with_page(1, vec![RawRecord::new("a", "A")]);
        let catalog = Catalog::new(Arc::new(source));

        catalog.load_current_page().await.unwrap();
        let outcome = catalog.load_next_page().await.unwrap();
        assert_eq!(
            outcome,
            PageOutcome {
                page: 2,
                added: 0,
                total: 1
            }
        );
    }
}
