//! # restbridge
//!
//! A lightweight REST client abstraction for applications that talk to a
//! single configured backend and want consistent request construction
//! without a full HTTP framework.
//!
//! ## Features
//!
//! - **Composable base URLs**: root, stage, prefix, and version assemble
//!   deterministically into every request URL
//! - **Pluggable authorization**: none, basic, bearer, or custom header
//!   strategies, with credentials supplied literally or through providers
//!   re-resolved on every call
//! - **Option merging**: per-call overrides layered over instance defaults
//!   without mutating them
//! - **Injectable transport**: the network exchange is a trait object; a
//!   reqwest-backed adapter ships by default
//! - **Middleware pipeline**: ordered response transformers applied before
//!   success/failure classification
//! - **Event notifications**: listeners keyed by status code or
//!   success/error category
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restbridge::{ClientConfig, RestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .root("api.example.com")
//!         .stage("dev")
//!         .version("v1")
//!         .build();
//!
//!     let client = RestClient::new(config)?;
//!     let response = client.get("/users", None).await?;
//!     println!("status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## With Authorization and Middleware
//!
//! ```rust,no_run
//! use restbridge::{
//!     AuthStrategy, AuthorizeArgs, ClientConfig, RestClient, middleware_fn,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .root("api.example.com")
//!         .strategy(AuthStrategy::Basic)
//!         .build();
//!
//!     let client = RestClient::new(config)?;
//!     client.authorize(AuthorizeArgs::with_credentials("user", "pass"))?;
//!
//!     client.use_middleware(middleware_fn(|response| {
//!         tracing::debug!(status = %response.status(), "response received");
//!         Ok(response)
//!     }));
//!     client.on("error", |response| {
//!         eprintln!("request failed: {}", response.status());
//!     });
//!
//!     let created = client
//!         .post("/orders", Some(&serde_json::json!({"item": "widget"})), None)
//!         .await?;
//!     println!("{}", created.text());
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod events;
mod middleware;
mod options;
mod response;
mod transport;
mod url;

pub use auth::{AuthStrategy, AuthorizeArgs, Secret, ValidateFn};
pub use client::RestClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use events::{ERROR_EVENT, SUCCESS_EVENT};
pub use middleware::{Middleware, MiddlewareFn, middleware_fn};
pub use options::{DefaultOptions, HeaderSource, RequestOptions, RequestParams};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

// Re-export common types
pub use http::{Method, StatusCode};

/// Prelude for common imports.
///
/// ```
/// use restbridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{AuthStrategy, AuthorizeArgs, Secret};
    pub use crate::client::RestClient;
    pub use crate::config::{ClientConfig, ClientConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::middleware::{Middleware, middleware_fn};
    pub use crate::options::{DefaultOptions, HeaderSource, RequestOptions};
    pub use crate::response::Response;
    pub use crate::transport::Transport;
    pub use http::{Method, StatusCode};
}
