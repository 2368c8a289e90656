//! Invocation host: runs a cloud function behind a local HTTP endpoint.

mod config;
mod server;

pub use config::{HostConfig, HOST_VAR, PORT_VAR};
pub use server::{InvocationServer, HEALTH_PATH, INVOKE_PATH};
