//! Response middleware chain.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{Response, Result};

/// A response transformer, applied to every response before success/failure
/// classification. Stages run strictly in registration order; the first
/// failure aborts the rest of the chain and becomes the call's failure.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Transform the previous stage's output into the next value.
    async fn handle(&self, response: Response) -> Result<Response>;
}

/// Adapter turning a synchronous closure into a [`Middleware`].
pub struct MiddlewareFn<F>(F);

/// Wrap a synchronous `Response -> Result<Response>` closure as middleware.
pub fn middleware_fn<F>(f: F) -> MiddlewareFn<F>
where
    F: Fn(Response) -> Result<Response> + Send + Sync,
{
    MiddlewareFn(f)
}

#[async_trait]
impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(Response) -> Result<Response> + Send + Sync,
{
    async fn handle(&self, response: Response) -> Result<Response> {
        (self.0)(response)
    }
}

/// Run `response` through every stage in order.
pub(crate) async fn run_chain(
    chain: &[Arc<dyn Middleware>],
    mut response: Response,
) -> Result<Response> {
    for stage in chain {
        response = stage.handle(response).await?;
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use http::StatusCode;
    use std::collections::HashMap;

    fn response(body: &str) -> Response {
        Response::new(StatusCode::OK, HashMap::new(), body.to_string(), "https://api.example.com/")
    }

    #[tokio::test]
    async fn test_stages_run_in_registration_order() {
        let chain: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(middleware_fn(|r: Response| {
                let body = format!("{}a", r.text());
                Ok(r.with_body(body))
            })),
            Arc::new(middleware_fn(|r: Response| {
                let body = format!("{}b", r.text());
                Ok(r.with_body(body))
            })),
        ];

        let out = run_chain(&chain, response("")).await.unwrap();
        assert_eq!(out.text(), "ab");
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_stages() {
        let chain: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(middleware_fn(|_| {
                Err(Error::Middleware("stage one broke".to_string()))
            })),
            Arc::new(middleware_fn(|r: Response| Ok(r.with_body("unreached")))),
        ];

        let err = run_chain(&chain, response("x")).await.unwrap_err();
        assert!(matches!(err, Error::Middleware(message) if message.contains("stage one")));
    }

    #[tokio::test]
    async fn test_empty_chain_is_identity() {
        let out = run_chain(&[], response("same")).await.unwrap();
        assert_eq!(out.text(), "same");
    }
}
