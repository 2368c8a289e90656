//! Invocation contract between a hosting runtime and a cloud function.

use crate::error::ForwarderError;
use crate::function::ResultEnvelope;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Event payload supplied by the hosting platform. Opaque to the function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationEvent(pub serde_json::Value);

impl From<serde_json::Value> for InvocationEvent {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Per-invocation context supplied by the hosting platform.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Name of the invoked function.
    pub function_name: String,
    /// Request ID for tracing.
    pub request_id: String,
}

impl InvocationContext {
    pub fn new(function_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            request_id: request_id.into(),
        }
    }
}

/// A function that can be invoked by a hosting runtime.
///
/// Invocations are independent: implementations hold only immutable
/// configuration and may be invoked concurrently.
#[async_trait]
pub trait CloudFunction: Send + Sync {
    /// Handle one invocation.
    async fn invoke(
        &self,
        event: InvocationEvent,
        ctx: &InvocationContext,
    ) -> Result<ResultEnvelope, ForwarderError>;

    /// Get the function name.
    fn name(&self) -> &str;
}
