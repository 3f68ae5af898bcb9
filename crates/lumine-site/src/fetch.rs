// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! Text retrieval over HTTP
//!
//! Everything the site reads is a plain document at a URL. [`TextSource`] is
//! the seam between the data logic and the network so handlers can be driven
//! by any source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// User agent sent with every request
const USER_AGENT: &str = concat!("lumine-site/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching documents
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A branch changelog could not be fetched
    #[error("Failed to fetch changelog for branch '{branch}': {source}")]
    Branch {
        branch: String,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// HTTP status code, when the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Branch { source, .. } => source.status(),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Client(_) => None,
        }
    }
}

/// Something that can return the text behind a URL
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Fetch the full body of `url` as text
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be retrieved or the server
    /// answers with a non-success status.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// [`TextSource`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a client with the given per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
