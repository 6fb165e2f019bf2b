//! Per-call request options and merging over instance defaults.

use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Header values for the instance defaults: either a literal map or a
/// zero-argument provider resolved freshly before every merge.
#[derive(Clone)]
pub enum HeaderSource {
    /// A fixed header map.
    Map(HashMap<String, String>),
    /// A provider consulted at the point of use.
    Provider(Arc<dyn Fn() -> HashMap<String, String> + Send + Sync>),
}

impl HeaderSource {
    /// Wrap a provider function.
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn() -> HashMap<String, String> + Send + Sync + 'static,
    {
        Self::Provider(Arc::new(f))
    }

    /// Resolve to a literal map.
    pub fn resolve(&self) -> HashMap<String, String> {
        match self {
            Self::Map(map) => map.clone(),
            Self::Provider(f) => f(),
        }
    }
}

impl Default for HeaderSource {
    fn default() -> Self {
        Self::Map(HashMap::new())
    }
}

impl From<HashMap<String, String>> for HeaderSource {
    fn from(map: HashMap<String, String>) -> Self {
        Self::Map(map)
    }
}

impl fmt::Debug for HeaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(map) => f.debug_tuple("HeaderSource::Map").field(map).finish(),
            Self::Provider(_) => f.write_str("HeaderSource::Provider(..)"),
        }
    }
}

/// Instance-wide defaults applied to every call before per-call overrides.
#[derive(Debug, Clone)]
pub struct DefaultOptions {
    /// Method used when a call supplies none.
    pub method: Method,
    /// Headers layered under per-call headers.
    pub headers: HeaderSource,
}

impl Default for DefaultOptions {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            method: Method::GET,
            headers: HeaderSource::Map(headers),
        }
    }
}

/// Per-call overrides. Built fresh for every call and never retained.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Override the method wholesale.
    pub method: Option<Method>,
    /// Headers merged key-by-key over the defaults; these win on conflict.
    pub headers: HashMap<String, String>,
    /// Override the body wholesale.
    pub body: Option<String>,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Final request parameters handed to the transport.
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// Resolved method.
    pub method: Method,
    /// Resolved headers.
    pub headers: HashMap<String, String>,
    /// Resolved body, if any.
    pub body: Option<String>,
}

/// Merge instance defaults with per-call overrides into a fresh record.
///
/// Headers merge key-by-key with the override winning; method and body are
/// replaced wholesale when the override supplies them. The defaults are
/// never mutated.
pub(crate) fn merge(defaults: &DefaultOptions, overrides: &RequestOptions) -> RequestParams {
    let mut headers = defaults.headers.resolve();
    for (name, value) in &overrides.headers {
        headers.insert(name.clone(), value.clone());
    }

    RequestParams {
        method: overrides.method.clone().unwrap_or_else(|| defaults.method.clone()),
        headers,
        body: overrides.body.clone(),
    }
}
