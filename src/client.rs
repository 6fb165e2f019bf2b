//! The REST client: construction, verb helpers, and dispatch.

use http::{Method, StatusCode};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{AuthorizeArgs, Authorizer};
use crate::config::ClientConfig;
use crate::events::ListenerRegistry;
use crate::middleware::{Middleware, run_chain};
use crate::options::{RequestOptions, merge};
use crate::transport::{ReqwestTransport, Transport};
use crate::{Error, Response, Result};

/// REST client bound to a single configured backend.
///
/// Cheap to clone; clones share configuration, authorization state,
/// middleware, and listeners. Registration operations (`authorize`,
/// `use_middleware`, `on`) are expected not to race in-flight calls —
/// single writer by convention, no internal ordering guarantees beyond
/// snapshot reads at dispatch time.
///
/// # Example
///
/// ```rust,no_run
/// use restbridge::{AuthStrategy, AuthorizeArgs, ClientConfig, RestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::builder()
///         .root("api.example.com")
///         .stage("dev")
///         .version("v1")
///         .strategy(AuthStrategy::Bearer)
///         .build();
///
///     let client = RestClient::new(config)?;
///     client.authorize(AuthorizeArgs::with_token("abc"))?;
///
///     let response = client.get("/users/1", None).await?;
///     println!("{}", response.text());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    authorizer: Authorizer,
    middlewares: RwLock<Vec<Arc<dyn Middleware>>>,
    listeners: ListenerRegistry,
}

impl RestClient {
    /// Create a client over the default reqwest transport.
    ///
    /// Fails with [`Error::Configuration`] or [`Error::InsecureScheme`] when
    /// the configuration does not validate.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()?))
    }

    /// Create a client over an injected transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let config = config.sanitize()?;
        let authorizer = Authorizer::new(config.strategy);
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                authorizer,
                middlewares: RwLock::new(Vec::new()),
                listeners: ListenerRegistry::default(),
            }),
        })
    }

    /// Get the sanitized configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The base URL every request path resolves against.
    pub fn base_url(&self) -> String {
        self.inner.config.base_url()
    }

    /// Resolve a request path to a full URL.
    pub fn build_url(&self, path: &str) -> String {
        self.inner.config.build_url(path)
    }

    /// Register credentials for the configured strategy. See
    /// [`AuthorizeArgs`] for the accepted combinations. May be called again
    /// later to replace credentials (token refresh).
    pub fn authorize(&self, args: AuthorizeArgs) -> Result<()> {
        self.inner.authorizer.authorize(args)
    }

    /// Whether the next request would carry credentials. Custom sessions
    /// re-validate on every call.
    pub fn is_authorized(&self) -> bool {
        self.inner.authorizer.is_authorized()
    }

    /// Append a middleware stage. Stages run in registration order for
    /// every subsequent call.
    pub fn use_middleware<M: Middleware + 'static>(&self, middleware: M) {
        self.inner.middlewares.write().push(Arc::new(middleware));
    }

    /// Register a listener under a status-code string (`"404"`),
    /// [`SUCCESS_EVENT`](crate::SUCCESS_EVENT), or
    /// [`ERROR_EVENT`](crate::ERROR_EVENT).
    pub fn on<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn(&Response) + Send + Sync + 'static,
    {
        self.inner.listeners.on(event, listener);
    }

    /// Register a listener for one status code.
    pub fn on_status<F>(&self, status: StatusCode, listener: F)
    where
        F: Fn(&Response) + Send + Sync + 'static,
    {
        self.on(status.as_u16().to_string(), listener);
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str, options: Option<RequestOptions>) -> Result<Response> {
        let mut options = options.unwrap_or_default();
        options.method = Some(Method::GET);
        self.call_route(path, options).await
    }

    /// Send a POST request, serializing `body` to JSON when supplied.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
        options: Option<RequestOptions>,
    ) -> Result<Response> {
        self.call_with_body(Method::POST, path, body, options).await
    }

    /// Send a PUT request, serializing `body` to JSON when supplied.
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
        options: Option<RequestOptions>,
    ) -> Result<Response> {
        self.call_with_body(Method::PUT, path, body, options).await
    }

    /// Send a PATCH request, serializing `body` to JSON when supplied.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
        options: Option<RequestOptions>,
    ) -> Result<Response> {
        self.call_with_body(Method::PATCH, path, body, options).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str, options: Option<RequestOptions>) -> Result<Response> {
        let mut options = options.unwrap_or_default();
        options.method = Some(Method::DELETE);
        self.call_route(path, options).await
    }

    /// Send a HEAD request. Never carries a body.
    pub async fn head(&self, path: &str, options: Option<RequestOptions>) -> Result<Response> {
        let mut options = options.unwrap_or_default();
        options.method = Some(Method::HEAD);
        options.body = None;
        self.call_route(path, options).await
    }

    async fn call_with_body<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        options: Option<RequestOptions>,
    ) -> Result<Response> {
        let mut options = options.unwrap_or_default();
        options.method = Some(method);
        if let Some(body) = body {
            options.body = Some(serde_json::to_string(body)?);
        }
        self.call_route(path, options).await
    }

    /// Dispatch one request: merge options, inject authorization, build the
    /// URL, invoke the transport, run middleware, emit events, classify.
    ///
    /// Transport and middleware failures propagate as-is; a completed
    /// response outside the 2xx range rejects with
    /// [`Error::UnsuccessfulResponse`] carrying the response.
    pub async fn call_route(&self, path: &str, options: RequestOptions) -> Result<Response> {
        let mut params = merge(&self.inner.config.default_options, &options);

        if self.inner.authorizer.is_authorized() {
            self.inner.authorizer.apply(&mut params.headers);
        }

        let url = self.inner.config.build_url(path);

        if self.inner.config.verbose {
            debug!(
                path,
                url = %url,
                method = %params.method,
                headers = ?params.headers,
                body = ?params.body,
                "dispatching request"
            );
        }

        let response = self.inner.transport.send(&url, params).await?;

        // Snapshot the chain; registrations during a call affect later
        // calls only.
        let chain = self.inner.middlewares.read().clone();
        let response = run_chain(&chain, response).await?;

        self.inner.listeners.notify(&response);

        if response.ok() {
            Ok(response)
        } else {
            Err(Error::UnsuccessfulResponse(response))
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url())
            .field("strategy", &self.inner.config.strategy)
            .finish()
    }
}
