//! Transport capability and the default reqwest-backed adapter.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::options::RequestParams;
use crate::{Error, Response, Result};

/// The capability that performs the actual network exchange.
///
/// The client never retries, never wraps transport errors, and defers all
/// timeout policy here. Implementations report their own failures as
/// [`Error::Transport`] (or any other variant they see fit); the dispatcher
/// propagates whatever comes back untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the exchange and produce a response.
    async fn send(&self, url: &str, params: RequestParams) -> Result<Response>;
}

/// Default transport built on a pooled [`reqwest::Client`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with sensible pool, compression, and redirect
    /// settings.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("restbridge/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already-configured [`reqwest::Client`] (custom timeouts,
    /// proxies, TLS settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, params: RequestParams) -> Result<Response> {
        let url = url::Url::parse(url).map_err(|e| Error::Transport(e.to_string()))?;

        let mut request = self.client.request(params.method, url);
        for (name, value) in &params.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = params.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.unwrap_or_default();

        Ok(Response::new(status, headers, body, final_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[tokio::test]
    async fn test_unparseable_url_is_a_transport_error() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .send(
                "not a url",
                RequestParams {
                    method: Method::GET,
                    headers: HashMap::new(),
                    body: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
