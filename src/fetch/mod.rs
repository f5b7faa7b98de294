//! Book retrieval
//!
//! The pipeline never talks to the network directly: it is handed a
//! [`Fetcher`] at construction time, so tests can substitute a canned
//! implementation and the HTTP client stays an explicitly owned resource
//! instead of a process-wide singleton.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Errors raised while retrieving one book.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One failed retrieval, kept for the aggregate pipeline error.
#[derive(Debug, Clone, Error)]
#[error("{name} ({url}): {message}")]
pub struct FetchFailure {
    pub name: String,
    pub url: String,
    pub message: String,
}

/// Capability for retrieving the raw text of one book.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher: HTTP(S) URLs go through a shared `reqwest` client,
/// anything else is treated as a local file path.
pub struct DocumentFetcher {
    client: reqwest::Client,
}

impl DocumentFetcher {
    /// Build a fetcher with its own connection pool. The client lives exactly
    /// as long as the fetcher that owns it.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for DocumentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            debug!(url, "downloading");
            let response = self.client.get(url).send().await?.error_for_status()?;
            Ok(response.text().await?)
        } else {
            debug!(path = url, "reading local file");
            Ok(tokio::fs::read_to_string(Path::new(url)).await?)
        }
    }
}
