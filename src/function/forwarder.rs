//! The request forwarder function.

use crate::config::ForwarderConfig;
use crate::env::ReadEnv;
use crate::error::{ConfigError, ForwarderError};
use crate::function::{CloudFunction, InvocationContext, InvocationEvent, ResultEnvelope};
use crate::http::{ReqwestClient, UpstreamClient, UpstreamRequest};
use async_trait::async_trait;
use reqwest::header::HeaderName;
use tracing::{debug, info, warn};

/// Header carrying the API key. Header names are case-insensitive on the wire.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Default function name reported to the host.
pub const FUNCTION_NAME: &str = "mock-api-forwarder";

/// Forwards each invocation as one authenticated GET to the configured
/// upstream and wraps the JSON reply in a [`ResultEnvelope`].
#[derive(Debug, Clone)]
pub struct RequestForwarder<C = ReqwestClient> {
    config: ForwarderConfig,
    client: C,
}

impl<C: UpstreamClient> RequestForwarder<C> {
    pub fn new(config: ForwarderConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Load configuration from the process environment.
    pub fn from_env(client: C) -> Result<Self, ConfigError> {
        Ok(Self::new(ForwarderConfig::from_env()?, client))
    }

    /// Load configuration from `env`. Fails before the client is ever used.
    pub fn from_reader<E: ReadEnv + ?Sized>(env: &E, client: C) -> Result<Self, ConfigError> {
        Ok(Self::new(ForwarderConfig::from_reader(env)?, client))
    }

    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    /// The request sent on every invocation.
    pub fn upstream_request(&self) -> UpstreamRequest {
        UpstreamRequest::get(self.config.api_url().clone())
            .header(
                HeaderName::from_static(API_KEY_HEADER),
                self.config.api_key().clone(),
            )
    }

    /// Call the upstream once and wrap its JSON body.
    ///
    /// The envelope status is 200 even when the upstream answered with an
    /// error status.
    pub async fn forward(&self) -> Result<ResultEnvelope, ForwarderError> {
        let response = self.client.send(self.upstream_request()).await?;

        if !response.status.is_success() {
            warn!(
                status = %response.status,
                url = %self.config.api_url(),
                "upstream returned non-success status; envelope still reports 200"
            );
        }

        let payload = response.json()?;
        ResultEnvelope::wrap(payload)
    }
}

#[async_trait]
impl<C: UpstreamClient> CloudFunction for RequestForwarder<C> {
    async fn invoke(
        &self,
        _event: InvocationEvent,
        ctx: &InvocationContext,
    ) -> Result<ResultEnvelope, ForwarderError> {
        info!(
            request_id = %ctx.request_id,
            url = %self.config.api_url(),
            "forwarding invocation"
        );

        let envelope = self.forward().await?;
        debug!(request_id = %ctx.request_id, bytes = envelope.body.len(), "built envelope");
        Ok(envelope)
    }

    fn name(&self) -> &str {
        FUNCTION_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{API_KEY_VAR, API_URL_VAR};
    use crate::env::InMemoryEnv;
    use crate::error::{DecodeError, TransportError};
    use crate::http::mock::MockUpstream;
    use crate::http::StatusCode;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    const URL: &str = "https://mock.example.com/v1/status";

    fn forwarder(client: MockUpstream) -> RequestForwarder<MockUpstream> {
        let config = ForwarderConfig::new("test-key-123", URL).unwrap();
        RequestForwarder::new(config, client)
    }

    async fn invoke(
        forwarder: &RequestForwarder<MockUpstream>,
    ) -> Result<ResultEnvelope, ForwarderError> {
        let ctx = InvocationContext::new(FUNCTION_NAME, "req-1");
        forwarder.invoke(InvocationEvent::default(), &ctx).await
    }

    #[tokio::test]
    async fn test_wraps_upstream_json() {
        let upstream = MockUpstream::replying(200, r#"{"ok": true}"#);
        let envelope = assert_ok!(invoke(&forwarder(upstream.clone())).await);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "statusCode": 200,
                "body": "{\"message\": \"Called mock API\", \"response\": {\"ok\": true}}"
            })
        );
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_not_forwarded() {
        let upstream = MockUpstream::replying(500, r#"{"error": "boom"}"#);
        let envelope = assert_ok!(invoke(&forwarder(upstream)).await);

        assert_eq!(envelope.status_code, StatusCode::OK);
        assert_eq!(
            envelope.decode_body().unwrap().response,
            json!({"error": "boom"})
        );
    }

    #[tokio::test]
    async fn test_request_shape() {
        let upstream = MockUpstream::replying(200, "[]");
        assert_ok!(invoke(&forwarder(upstream.clone())).await);

        let requests = upstream.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url.as_str(), URL);
        assert_eq!(request.url.query(), None);
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.get_header("X-Api-Key").unwrap(), "test-key-123");
    }

    #[tokio::test]
    async fn test_event_is_ignored() {
        let upstream = MockUpstream::replying(200, "1");
        let forwarder = forwarder(upstream.clone());
        let ctx = InvocationContext::new(FUNCTION_NAME, "req-2");

        let a = assert_ok!(forwarder.invoke(json!({"path": "/x"}).into(), &ctx).await);
        let b = assert_ok!(forwarder.invoke(InvocationEvent::default(), &ctx).await);

        assert_eq!(a, b);
        assert_eq!(upstream.requests()[0].url, upstream.requests()[1].url);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let upstream = MockUpstream::replying(200, "{}");
        let env = InMemoryEnv::new().with(API_URL_VAR, URL);

        let err = assert_err!(RequestForwarder::from_reader(&env, upstream.clone()));
        assert!(matches!(err, ConfigError::Missing { var } if var == API_KEY_VAR));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_url_fails_before_network() {
        let upstream = MockUpstream::replying(200, "{}");
        let env = InMemoryEnv::new().with(API_KEY_VAR, "k");

        let err = assert_err!(RequestForwarder::from_reader(&env, upstream.clone()));
        assert!(matches!(err, ConfigError::Missing { var } if var == API_URL_VAR));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_from_reader_uses_configured_values() {
        let upstream = MockUpstream::replying(200, "null");
        let env = InMemoryEnv::new()
            .with(API_KEY_VAR, "env-key")
            .with(API_URL_VAR, "http://127.0.0.1:9999/mock");
        let forwarder = assert_ok!(RequestForwarder::from_reader(&env, upstream.clone()));

        let envelope = assert_ok!(invoke(&forwarder).await);
        assert_eq!(
            envelope.body,
            r#"{"message": "Called mock API", "response": null}"#
        );
        let request = &upstream.requests()[0];
        assert_eq!(request.url.as_str(), "http://127.0.0.1:9999/mock");
        assert_eq!(request.get_header("x-api-key").unwrap(), "env-key");
    }

    #[tokio::test]
    async fn test_big_integers_pass_through_unchanged() {
        let upstream = MockUpstream::replying(
            200,
            r#"{"id": 123456789012345678901234567890, "n": 18446744073709551616}"#,
        );
        let envelope = assert_ok!(forwarder(upstream).forward().await);

        assert_eq!(
            envelope.body,
            r#"{"message": "Called mock API", "response": {"id": 123456789012345678901234567890, "n": 18446744073709551616}}"#
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let upstream = MockUpstream::replying(200, "<html>Bad Gateway</html>");
        let err = assert_err!(invoke(&forwarder(upstream)).await);
        assert!(matches!(err, ForwarderError::Decode(DecodeError::Json(_))));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let upstream = MockUpstream::replying(200, vec![0xc3, 0x28]);
        let err = assert_err!(invoke(&forwarder(upstream)).await);
        assert!(matches!(err, ForwarderError::Decode(DecodeError::Utf8(_))));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let upstream = MockUpstream::failing("connection refused");
        let err = assert_err!(invoke(&forwarder(upstream.clone())).await);

        assert_eq!(err.kind(), "TransportError");
        assert!(matches!(
            err,
            ForwarderError::Transport(TransportError { ref url, .. }) if url == URL
        ));
        assert_eq!(upstream.calls(), 1);
    }

    #[test]
    fn test_function_name() {
        let upstream = MockUpstream::replying(200, "{}");
        assert_eq!(forwarder(upstream).name(), FUNCTION_NAME);
    }
}
