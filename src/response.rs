//! HTTP response wrapper.

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::Result;

/// Response produced by a transport, as seen by middleware, event
/// listeners, and ultimately the caller.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Bytes,
    url: String,
}

impl Response {
    /// Create a response. Transports and tests build responses with this.
    pub fn new(
        status: StatusCode,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url: url.into(),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the status code as a bare number.
    pub fn status_u16(&self) -> u16 {
        self.status.as_u16()
    }

    /// Check if the response was successful (2xx).
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get a specific header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Get the URL the response was served from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get the content type if available.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Replace the body, keeping everything else. Useful in middleware.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Insert a header, keeping everything else. Useful in middleware.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
