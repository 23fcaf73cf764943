//! Opaque handler and filter callables
//!
//! The router builder never inspects or awaits handlers itself; it only
//! places them in a chain that the dispatcher drives at request time.
//! Handlers and filters are therefore stored as boxed async callables.

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// The main request handler for an action.
///
/// Consumes the request and produces the final response for the route
/// (unless an after filter replaces it).
pub type ActionFn = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// A filter step callable.
///
/// Receives the exchange context and decides whether the chain
/// continues or halts with a response.
pub type FilterFn = Arc<dyn Fn(FilterContext) -> BoxFuture<'static, FilterFlow> + Send + Sync>;

/// The exchange state handed to a filter.
///
/// Before the main handler runs, `response` is `None` and `request`
/// carries the live body. After the main handler has run, `request`
/// carries the original head with an empty body (the handler consumed
/// it) and `response` holds the handler's response.
pub struct FilterContext {
    pub request: Request<Body>,
    pub response: Option<Response>,
}

/// Outcome of one filter step.
pub enum FilterFlow {
    /// Pass control to the next step in the chain.
    Continue(FilterContext),
    /// Stop the chain and answer with this response.
    Halt(Response),
}

/// Wrap an async closure into an [`ActionFn`].
///
/// # Example
///
/// ```rust,ignore
/// let list_users = action(|_req| async { Json(json!({ "users": [] })) });
/// ```
pub fn action<F, Fut, R>(f: F) -> ActionFn
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req| {
        let fut = f(req);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// Wrap an async closure into a [`FilterFn`].
///
/// # Example
///
/// ```rust,ignore
/// let log_requests = filter_fn(|ctx| async move {
///     tracing::info!("{} {}", ctx.request.method(), ctx.request.uri());
///     FilterFlow::Continue(ctx)
/// });
/// ```
pub fn filter_fn<F, Fut>(f: F) -> FilterFn
where
    F: Fn(FilterContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FilterFlow> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_action_wraps_into_response() {
        let handler = action(|_req| async { "ok" });
        let req = Request::builder()
            .uri("/anything")
            .body(Body::empty())
            .unwrap();
        let response = handler(req).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_filter_fn_continue_keeps_context() {
        let filter = filter_fn(|ctx| async move { FilterFlow::Continue(ctx) });
        let ctx = FilterContext {
            request: Request::builder()
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
            response: None,
        };
        match filter(ctx).await {
            FilterFlow::Continue(ctx) => assert_eq!(ctx.request.uri().path(), "/users"),
            FilterFlow::Halt(_) => panic!("filter should continue"),
        }
    }

    #[tokio::test]
    async fn test_filter_fn_halt_short_circuits() {
        let filter = filter_fn(|_ctx| async move {
            FilterFlow::Halt(StatusCode::UNAUTHORIZED.into_response())
        });
        let ctx = FilterContext {
            request: Request::builder().body(Body::empty()).unwrap(),
            response: None,
        };
        match filter(ctx).await {
            FilterFlow::Halt(response) => {
                assert_eq!(response.status(), StatusCode::UNAUTHORIZED)
            }
            FilterFlow::Continue(_) => panic!("filter should halt"),
        }
    }
}
