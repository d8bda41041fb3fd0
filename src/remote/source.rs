//! Record sources: where list screens get their data.
//!
//! The upstream API answers `GET <url>` with a page envelope:
//!
//! ```json
//! { "count": 60, "next": "...?page=2", "previous": null, "results": [ {...} ] }
//! ```
//!
//! Only `results` is consumed. The cursors are parsed so they show up in
//! logs, but no follow-up pages are requested.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

/// Errors that can occur while fetching a list.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Upstream answered with a non-success status.
    Api { status: u16, message: String },
    /// Body wasn't a page envelope.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Page envelope returned by list endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Page {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Value>,
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Fetch one page of raw records from `url`.
    async fn fetch(&self, url: &str) -> Result<Page, SourceError>;
}

/// Unauthenticated HTTP source backed by reqwest.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Page, SourceError> {
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("Response status for {}: {}", url, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let page: Page =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        info!(
            "Fetched {} records from {} (count={:?}, next={:?})",
            page.results.len(),
            url,
            page.count,
            page.next
        );
        Ok(page)
    }
}
