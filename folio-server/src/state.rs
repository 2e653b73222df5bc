//! Application state

use anyhow::{Context, Result};
use folio_core::source::{DataSource, HttpSource, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use folio_core::{Catalog, PageError, PageOutcome};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The one catalog every trigger works on
    pub catalog: Arc<Catalog>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events, tagged by `type` on the wire
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A page was fetched and merged into the collection
    PageLoaded { page: u32, added: usize, total: usize },

    /// A page fetch failed; the collection is unchanged
    FetchFailed {
        page: u32,
        kind: &'static str,
        message: String,
    },
}

impl ServerEvent {
    /// SSE event name, same as the `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::PageLoaded { .. } => "page_loaded",
            ServerEvent::FetchFailed { .. } => "fetch_failed",
        }
    }
}

impl AppState {
    /// Create application state from the environment.
    ///
    /// `FOLIO_API_URL` picks the catalog endpoint and
    /// `FOLIO_FETCH_TIMEOUT_SECS` the per-request timeout.
    pub fn new() -> Result<Self> {
        let api_url =
            std::env::var("FOLIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout = match std::env::var("FOLIO_FETCH_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("Invalid FOLIO_FETCH_TIMEOUT_SECS: {}", secs))?,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let source = HttpSource::new(api_url, timeout)?;
        tracing::info!("Catalog source: {}", source.describe());
        Ok(Self::with_source(Arc::new(source)))
    }

    /// Create application state over any data source
    pub fn with_source(source: Arc<dyn DataSource>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            catalog: Arc::new(Catalog::new(source)),
            event_tx,
        }
    }

    /// Load the page under the cursor (the initial page) and announce it
    pub async fn load_current_page(&self) -> Result<PageOutcome, PageError> {
        let result = self.catalog.load_current_page().await;
        self.announce(result)
    }

    /// Advance to the next page and announce the outcome
    pub async fn load_next_page(&self) -> Result<PageOutcome, PageError> {
        let result = self.catalog.load_next_page().await;
        self.announce(result)
    }

    fn announce(
        &self,
        result: Result<PageOutcome, PageError>,
    ) -> Result<PageOutcome, PageError> {
        match &result {
            Ok(outcome) => self.broadcast(ServerEvent::PageLoaded {
                page: outcome.page,
                added: outcome.added,
                total: outcome.total,
            }),
            Err(e) => self.broadcast(ServerEvent::FetchFailed {
                page: e.page,
                kind: e.kind(),
                message: e.error.to_string(),
            }),
        }
        result
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
