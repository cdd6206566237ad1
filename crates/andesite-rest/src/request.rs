//! Per-call request options

use std::time::Duration;

/// Overrides applied to a single request
///
/// Headers set here replace the client's default header of the same name
/// (`User-Id`, `Authorization`) for this call only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestConfig {
    /// Empty config, same as [`Default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Replace the client timeout for this request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Per-call headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Per-call query parameters
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Per-call timeout
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn apply(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        request
    }
}
