//! # Mock API Forwarder
//!
//! A cloud-function handler that performs one authenticated GET against a
//! configured endpoint and wraps the JSON reply in a fixed-shape envelope.
//!
//! ## Flow
//!
//! ```text
//!  (event, context) ──▶ RequestForwarder ──GET + X-Api-Key──▶ upstream
//!                              │                                 │
//!                              ◀──────── status + JSON body ─────┘
//!                              ▼
//!        { "statusCode": 200, "body": "{\"message\": ..., \"response\": ...}" }
//! ```
//!
//! The envelope always reports `200`; the upstream status is not forwarded.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mockapi_forwarder::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Reads MOCK_API_KEY and MOCK_API_URL; fails fast if either is missing.
//!     let forwarder = RequestForwarder::from_env(ReqwestClient::new())?;
//!
//!     let ctx = InvocationContext::new("mock-api-forwarder", "req-1");
//!     let envelope = forwarder.invoke(InvocationEvent::default(), &ctx).await?;
//!     println!("{}", envelope.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Hosting
//!
//! [`InvocationServer`] hosts any [`CloudFunction`] behind `POST /invoke`,
//! reporting invocation errors as `500` with `errorType` / `errorMessage`.

pub mod config;
pub mod env;
pub mod error;
pub mod function;
pub mod http;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::config::ForwarderConfig;
    pub use crate::error::{ConfigError, DecodeError, ForwarderError, TransportError};
    pub use crate::function::{
        CloudFunction, InvocationContext, InvocationEvent, RequestForwarder, ResultEnvelope,
    };
    pub use crate::http::{ReqwestClient, StatusCode, UpstreamClient};
    pub use crate::runtime::{HostConfig, InvocationServer};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use config::ForwarderConfig;
pub use error::ForwarderError;
pub use function::{
    CloudFunction, InvocationContext, InvocationEvent, RequestForwarder, ResultEnvelope,
};
pub use runtime::{HostConfig, InvocationServer};
