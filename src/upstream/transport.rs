//! HTTP transport seam
//!
//! [`UpstreamClient`](super::UpstreamClient) builds URLs and interprets
//! responses; a `Transport` only moves bytes. Production uses reqwest, tests
//! plug in scripted fakes.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::error::UpstreamError;

/// Status and body of one upstream HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Only network-level failures are errors; non-2xx statuses are returned
    async fn get(&self, url: Url) -> Result<RawResponse, UpstreamError>;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`
    pub fn new(timeout: std::time::Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                UpstreamError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, UpstreamError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
