//! The cloud function: invocation contract, envelope, and the forwarder itself.

pub mod envelope;
pub mod forwarder;
pub mod handler;

pub use envelope::{EnvelopeBody, ResultEnvelope};
pub use forwarder::RequestForwarder;
pub use handler::{CloudFunction, InvocationContext, InvocationEvent};
