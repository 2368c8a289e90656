//! HTTP types for the single upstream call.

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod request;
mod response;

pub use client::{ReqwestClient, UpstreamClient};
pub use request::UpstreamRequest;
pub use response::{StatusCode, UpstreamResponse};
