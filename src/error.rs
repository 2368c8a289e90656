//! Error types for the request forwarder.
//!
//! Every failure aborts the invocation. Nothing here is recovered locally;
//! the hosting runtime decides how to report it.

/// Top-level invocation error.
#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    /// Required configuration is absent or malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The upstream endpoint could not be reached or its body could not be read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The upstream body is not UTF-8 JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The envelope body could not be encoded.
    #[error("failed to encode envelope body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ForwarderError {
    /// Name of the error kind, as reported by the invocation host.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::Transport(_) => "TransportError",
            Self::Decode(_) => "DecodeError",
            Self::Encode(_) => "EncodeError",
        }
    }
}

/// Configuration errors. Raised before any network call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: environment variable {var} is not set")]
    Missing { var: String },

    #[error("configuration error: environment variable {var} is not valid unicode")]
    NotUnicode { var: String },

    #[error("configuration error: {var} is not a valid URL: {reason}")]
    InvalidUrl { var: String, reason: String },

    #[error("configuration error: {var} is not a valid header value")]
    InvalidHeaderValue { var: String },

    #[error("configuration error: {var} is not a valid port: {value}")]
    InvalidPort { var: String, value: String },
}

/// Failure to reach the upstream endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: GET {url} failed: {message}")]
pub struct TransportError {
    /// Target URL of the failed request.
    pub url: String,
    /// Underlying client error.
    pub message: String,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// The upstream body could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("decode error: upstream body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("decode error: upstream body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
