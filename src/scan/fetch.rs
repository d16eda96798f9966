//! Network transport used by the probes.
//!
//! [`MediaFetcher`] is the seam between the probes and the network:
//! [`HttpFetcher`] implements it over `reqwest`, tests substitute their own.

use crate::error::{MediaScanError, Result};
use crate::scan::config::HttpConfig;
use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE, RANGE};
use reqwest::{redirect, Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// Headers of interest from a header-only request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
}

impl ResponseHead {
    /// Pull length and type from a header map; malformed values read as absent.
    pub fn from_headers(status: u16, headers: &HeaderMap) -> Self {
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self {
            status,
            content_length,
            content_type,
        }
    }
}

/// Source of resource headers and leading bytes.
pub trait MediaFetcher: Send + Sync + 'static {
    /// Issue a header-only request against `url`.
    fn head(&self, url: &str) -> impl Future<Output = Result<ResponseHead>> + Send;

    /// Fetch at most the first `len` bytes of `url`.
    fn fetch_range(&self, url: &str, len: usize) -> impl Future<Output = Result<Bytes>> + Send;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: HttpConfig,
}

impl HttpFetcher {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| MediaScanError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> MediaScanError {
        if e.is_timeout() {
            MediaScanError::Timeout {
                millis: self.config.connect_timeout_ms,
            }
        } else if e.is_builder() {
            MediaScanError::MalformedInput(e.to_string())
        } else {
            MediaScanError::Network(e.to_string())
        }
    }
}

/// Map a non-success status to the matching error.
fn status_error(status: StatusCode) -> MediaScanError {
    match status.as_u16() {
        401 | 403 | 405 | 451 => MediaScanError::Blocked {
            status: Some(status.as_u16()),
            message: status.to_string(),
        },
        code => MediaScanError::Network(format!("unexpected status {}", code)),
    }
}

impl MediaFetcher for HttpFetcher {
    async fn head(&self, url: &str) -> Result<ResponseHead> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let head = ResponseHead::from_headers(status.as_u16(), response.headers());
        debug!(
            url,
            status = head.status,
            content_length = ?head.content_length,
            content_type = ?head.content_type,
            "HEAD response"
        );
        Ok(head)
    }

    async fn fetch_range(&self, url: &str, len: usize) -> Result<Bytes> {
        if len == 0 {
            return Ok(Bytes::new());
        }
        let mut response = self
            .client
            .get(url)
            .header(RANGE, format!("bytes=0-{}", len - 1))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        if status != StatusCode::PARTIAL_CONTENT {
            trace!(url, %status, "Server ignored range request; truncating body");
        }

        // Stop reading once `len` bytes arrived, whatever the server sends.
        let mut buf = BytesMut::with_capacity(len);
        while buf.len() < len {
            match response
                .chunk()
                .await
                .map_err(|e| self.map_transport_error(e))?
            {
                Some(chunk) => {
                    let take = chunk.len().min(len - buf.len());
                    buf.extend_from_slice(&chunk[..take]);
                }
                None => break,
            }
        }
        debug!(url, bytes = buf.len(), "Range response");
        Ok(buf.freeze())
    }
}
