//! Upstream HTTP client seam.

use crate::error::TransportError;
use crate::http::{StatusCode, UpstreamRequest, UpstreamResponse};
use async_trait::async_trait;
use tracing::debug;

/// Executes the upstream request.
///
/// Implementations must send exactly one GET per call, with no body and no
/// changes to the URL. Any failure up to and including reading the body is
/// a [`TransportError`].
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}

/// [`UpstreamClient`] backed by `reqwest`, with the client's default
/// timeout and redirect policy.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UpstreamClient for ReqwestClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let url = request.url.to_string();
        debug!(url = %url, "sending upstream request");

        let response = self
            .client
            .get(request.url)
            .headers(request.headers)
            .send()
            .await
            .map_err(|e| TransportError::new(&url, describe(&e)))?;

        let status = StatusCode(response.status().as_u16());
        let body = response.bytes().await.map_err(|e| {
            TransportError::new(&url, format!("failed to read response body: {}", describe(&e)))
        })?;

        debug!(url = %url, status = %status, bytes = body.len(), "upstream responded");
        Ok(UpstreamResponse { status, body })
    }
}

/// Flatten an error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
