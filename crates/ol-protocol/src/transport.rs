//! Outbound HTTP to OGC map servers.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use ol_common::{LayerError, LayerResult};

/// Settings for the outbound client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Whole-request timeout
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Status and body of an upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET against an OGC endpoint.
#[async_trait]
pub trait OgcTransport: Send + Sync {
    async fn get(&self, url: &str) -> LayerResult<TransportResponse>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &GatewayConfig) -> LayerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| LayerError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OgcTransport for HttpTransport {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> LayerResult<TransportResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LayerError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LayerError::Transport(e.to_string()))?;

        let response = TransportResponse { status, body };
        if !response.is_success() {
            warn!(status, "OGC server answered with a non-success status");
        }
        debug!(status, bytes = response.body.len(), "Received OGC response");

        Ok(response)
    }
}
