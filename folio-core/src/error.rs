//! Error types for Folio Core

use thiserror::Error;

/// Result type alias using FolioError
pub type Result<T> = std::result::Result<T, FolioError>;

/// Errors from interpreting caller input.
///
/// Fetch failures are not here: they travel as [`PageError`] so the page
/// they hit stays attached.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FolioError {
    #[error("Invalid sort key: {0} (expected \"title\" or \"date\")")]
    InvalidSortKey(String),
}

/// Errors raised while fetching a page from the catalog API.
///
/// Each one ends a single fetch attempt. The collection is left untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Network or transport failure, error status, or a body that is not JSON
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// JSON body without the expected `data.data` record array
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid page number: {0} (pages start at 1)")]
    InvalidPage(u32),
}

impl SourceError {
    /// Short machine-readable name for logs and API bodies
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Fetch(_) => "fetch_error",
            SourceError::InvalidResponse(_) => "invalid_response",
            SourceError::InvalidPage(_) => "invalid_page",
        }
    }
}

/// A failed page load, tagged with the page that was requested
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("page {page}: {error}")]
pub struct PageError {
    pub page: u32,
    #[source]
    pub error: SourceError,
}

impl PageError {
    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Fetch(err.to_string())
    }
}
