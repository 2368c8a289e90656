//! Upstream response and status codes.

use crate::error::DecodeError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const PAYLOAD_TOO_LARGE: StatusCode = StatusCode(413);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw upstream response: status plus body bytes.
#[derive(Debug, Clone, Default)]
pub struct UpstreamResponse {
    /// HTTP status code returned by the upstream.
    pub status: StatusCode,
    /// Response body.
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode(status),
            body: body.into(),
        }
    }

    /// Decode the body as strict UTF-8 text.
    pub fn text(&self) -> Result<&str, DecodeError> {
        Ok(std::str::from_utf8(&self.body)?)
    }

    /// Decode the body as UTF-8 and parse it as an arbitrary JSON value.
    pub fn json(&self) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::from_str(self.text()?)?)
    }
}
