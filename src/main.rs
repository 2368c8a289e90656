//! Runs the request forwarder behind the local invocation host.

use mockapi_forwarder::env::SystemEnv;
use mockapi_forwarder::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail fast: a missing key or URL stops the process before it listens.
    let config = ForwarderConfig::from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    tracing::info!("Forwarding to {}", config.api_url());

    let host = HostConfig::from_reader(&SystemEnv)?;
    let forwarder = RequestForwarder::new(config, ReqwestClient::new());
    let server = InvocationServer::new(host.clone(), forwarder);

    tracing::info!("Try: curl -X POST http://localhost:{}/invoke", host.port);
    tracing::info!("Health check: curl http://localhost:{}/_health", host.port);

    server.run().await
}
