//! Invocation host HTTP server.

use crate::function::{CloudFunction, InvocationContext, InvocationEvent};
use crate::http::StatusCode;
use crate::runtime::HostConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Path that triggers an invocation.
pub const INVOKE_PATH: &str = "/invoke";
/// Health check path.
pub const HEALTH_PATH: &str = "/_health";

/// Local stand-in for a cloud platform.
///
/// `POST /invoke` turns the request body into an [`InvocationEvent`], runs
/// the hosted function, and answers with the envelope. Invocation errors
/// are reported as `500` with an `errorType`/`errorMessage` object.
pub struct InvocationServer<F> {
    /// Server configuration.
    config: HostConfig,
    /// Hosted function.
    function: Arc<F>,
}

impl<F: CloudFunction + 'static> InvocationServer<F> {
    pub fn new(config: HostConfig, function: F) -> Self {
        Self {
            config,
            function: Arc::new(function),
        }
    }

    /// Bind to the configured address and serve until an accept error.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            "Invocation host for '{}' listening on {}",
            self.function.name(),
            listener.local_addr()?
        );

        let function = self.function.clone();
        let config = Arc::new(self.config);

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let function = function.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let function = function.clone();
                    let config = config.clone();
                    async move { handle_request(req, function, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request<F: CloudFunction>(
    req: Request<Incoming>,
    function: Arc<F>,
    config: Arc<HostConfig>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    debug!("Handling request: {} {} from {}", method, path, remote_addr);

    if config.enable_health && path == HEALTH_PATH {
        return Ok(text_response(StatusCode::OK, "OK"));
    }

    if path != INVOKE_PATH {
        return Ok(text_response(StatusCode::NOT_FOUND, "Not found"));
    }

    if method != Method::POST {
        return Ok(text_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Invocations must use POST",
        ));
    }

    let event = match read_event(req, config.max_event_size).await {
        Ok(event) => event,
        Err(response) => return Ok(response),
    };

    let ctx = InvocationContext::new(function.name(), generate_request_id());

    match function.invoke(event, &ctx).await {
        Ok(envelope) => {
            info!(request_id = %ctx.request_id, "invocation succeeded");
            Ok(json_response(StatusCode::OK, &envelope))
        }
        Err(e) => {
            error!(
                "Function '{}' error: {} [{}]",
                ctx.function_name, e, ctx.request_id
            );
            let report = serde_json::json!({
                "errorType": e.kind(),
                "errorMessage": e.to_string(),
            });
            Ok(json_response(StatusCode::INTERNAL_SERVER_ERROR, &report))
        }
    }
}

/// Read the request body as an event. An empty body is the JSON `null` event.
async fn read_event(
    req: Request<Incoming>,
    limit: usize,
) -> Result<InvocationEvent, Response<Full<Bytes>>> {
    let body = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!("Rejected event larger than {} bytes", limit);
            return Err(text_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Event body too large",
            ));
        }
        Err(e) => {
            warn!("Failed to read event body: {}", e);
            return Err(text_response(StatusCode::BAD_REQUEST, e.to_string()));
        }
    };

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(InvocationEvent::default());
    }

    serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected event that is not JSON: {}", e);
        text_response(StatusCode::BAD_REQUEST, format!("Event is not valid JSON: {}", e))
    })
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => build_response(status, "application/json", body.into()),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn text_response(status: StatusCode, message: impl Into<String>) -> Response<Full<Bytes>> {
    build_response(status, "text/plain", Bytes::from(message.into()))
}

/// Build a hyper Response.
fn build_response(
    status: StatusCode,
    content_type: &'static str,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            status
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", timestamp, seq)
}
