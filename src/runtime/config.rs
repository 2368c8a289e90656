//! Invocation host configuration.

use crate::config::optional;
use crate::env::ReadEnv;
use crate::error::ConfigError;

/// Environment variable overriding the bind host.
pub const HOST_VAR: &str = "FORWARDER_HOST";
/// Environment variable overriding the port.
pub const PORT_VAR: &str = "FORWARDER_PORT";

/// Configuration for the invocation host.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum event size in bytes.
    pub max_event_size: usize,
    /// Whether to serve the health check endpoint.
    pub enable_health: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_event_size: 6 * 1024 * 1024,
            enable_health: true,
        }
    }
}

impl HostConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `FORWARDER_HOST` / `FORWARDER_PORT` when set.
    pub fn from_reader<E: ReadEnv + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = optional(env, HOST_VAR)? {
            config.host = host;
        }
        if let Some(port) = optional(env, PORT_VAR)? {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR.to_string(),
                value: port.clone(),
            })?;
        }
        Ok(config)
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the maximum event size.
    pub fn max_event_size(mut self, bytes: usize) -> Self {
        self.max_event_size = bytes;
        self
    }

    /// Enable or disable the health check endpoint.
    pub fn health(mut self, enabled: bool) -> Self {
        self.enable_health = enabled;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
