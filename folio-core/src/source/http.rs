//! HTTP source for the public books API

use super::{check_page, parse_page, DataSource, SourceResult};
use crate::error::SourceError;
use crate::types::RawRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default catalog endpoint
pub const DEFAULT_API_URL: &str = "https://api.freeapi.app/api/v1/public/books";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches pages with a single `GET <endpoint>?page=<n>`.
///
/// No retries: a failed page is reported once and left to the caller.
pub struct HttpSource {
    client: Client,
    endpoint: String,
}

impl HttpSource {
    /// Create a source for `endpoint` with the given request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_page(&self, page: u32) -> SourceResult<Vec<RawRecord>> {
        check_page(page)?;

        tracing::debug!("Requesting page {} from {}", page, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Fetch(format!(
                "page {} returned HTTP {}",
                page, status
            )));
        }

        let body = response.text().await?;
        let records = parse_page(&body)?;
        tracing::debug!("Page {} returned {} records", page, records.len());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("http source {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let source = HttpSource::new("http://localhost:9999/books/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:9999/books");
        assert!(source.describe().contains("localhost:9999"));
    }

    #[tokio::test]
    async fn test_page_zero_rejected_without_request() {
        // Nothing listens here; the page check must fail first
        let source = HttpSource::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let err = source.fetch_page(0).await.unwrap_err();
        assert_eq!(err, SourceError::InvalidPage(0));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_fetch_error() {
        let source = HttpSource::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = source.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, SourceError::Fetch(_)));
    }
}
