//! Recording test double for [`UpstreamClient`].

use crate::error::TransportError;
use crate::http::{UpstreamClient, UpstreamRequest, UpstreamResponse};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Reply {
    Respond(UpstreamResponse),
    Fail(String),
}

#[derive(Debug)]
struct MockState {
    reply: Reply,
    requests: Vec<UpstreamRequest>,
}

/// Returns a scripted reply and records every request it receives.
/// Clones share state, so a clone kept by the test sees the calls.
#[derive(Debug, Clone)]
pub struct MockUpstream {
    state: Arc<Mutex<MockState>>,
}

impl MockUpstream {
    fn with_reply(reply: Reply) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                reply,
                requests: Vec::new(),
            })),
        }
    }

    pub fn replying(status: u16, body: impl Into<Bytes>) -> Self {
        Self::with_reply(Reply::Respond(UpstreamResponse::new(status, body)))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstream {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        let url = request.url.to_string();
        state.requests.push(request);
        match &state.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(TransportError::new(url, message.clone())),
        }
    }
}
