//! Byte-level fetch for the two static input files.
//!
//! Both datasets are fetched exactly once per view; there is no retry or
//! cancellation. A failed fetch degrades the corresponding dataset to empty
//! at the call site rather than crashing the view.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use capmap_common::{CapError, CapResult};

/// Fetches raw bytes from an HTTP(S) URL or a local file path.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with a default HTTP client.
    pub fn new() -> CapResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| CapError::Fetch {
                uri: "<client>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Fetch the full payload at `uri`.
    ///
    /// URIs starting with `http://` or `https://` go over the network;
    /// anything else is read from the filesystem.
    pub async fn fetch(&self, uri: &str) -> CapResult<Bytes> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            self.fetch_http(uri).await
        } else {
            self.fetch_file(uri).await
        }
    }

    async fn fetch_http(&self, uri: &str) -> CapResult<Bytes> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| CapError::Fetch {
                uri: uri.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CapError::Fetch {
                uri: uri.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().await.map_err(|e| CapError::Fetch {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;
        debug!(uri = %uri, bytes = body.len(), "fetched payload");
        Ok(body)
    }

    async fn fetch_file(&self, path: &str) -> CapResult<Bytes> {
        let data = tokio::fs::read(path).await.map_err(|e| CapError::Fetch {
            uri: path.to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path, bytes = data.len(), "read payload from disk");
        Ok(Bytes::from(data))
    }
}
