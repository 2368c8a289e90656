//! Outgoing upstream request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

/// A GET request to the upstream endpoint. It never carries a body.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// Target URL, used exactly as configured.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
}

impl UpstreamRequest {
    /// Create a GET request for `url` with no headers.
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Get a header value.
    pub fn get_header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }
}
