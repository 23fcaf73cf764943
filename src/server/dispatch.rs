//! Request-time execution of a registered middleware chain
//!
//! The builder resolves one [`RouteChain`] per registered route; at
//! request time a single axum handler drives the chain linearly:
//! auth (if configured), before filters, the main handler, then after
//! filters. Any filter may halt the chain with its own response.

use crate::core::filter::ActionFilter;
use crate::core::handler::{ActionFn, FilterContext, FilterFlow, FilterFn};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// The fully resolved middleware chain for one registered route.
///
/// Built once by the router builder; shared read-only by every request
/// the route serves.
pub struct RouteChain {
    /// Global auth filter; runs first, unconditionally, unaffected by
    /// per-action filter lists.
    pub(crate) auth: Option<FilterFn>,
    pub(crate) before: Vec<ActionFilter>,
    pub(crate) handler: ActionFn,
    pub(crate) after: Vec<ActionFilter>,
}

impl RouteChain {
    /// Drive the chain for one request.
    ///
    /// Execution order is `[auth?, before.., handler, after..]`. Before
    /// filters see the live request; after filters see the original
    /// request head (the handler consumed the body) plus the response.
    pub async fn run(self: Arc<Self>, req: Request<Body>) -> Response {
        // Keep the request head around for the after phase.
        let method = req.method().clone();
        let uri = req.uri().clone();
        let version = req.version();
        let headers = req.headers().clone();

        let mut ctx = FilterContext {
            request: req,
            response: None,
        };

        if let Some(auth) = &self.auth {
            match auth(ctx).await {
                FilterFlow::Continue(next) => ctx = next,
                FilterFlow::Halt(response) => return response,
            }
        }

        for filter in &self.before {
            match filter.call(ctx).await {
                FilterFlow::Continue(next) => ctx = next,
                FilterFlow::Halt(response) => return response,
            }
        }

        let response = (self.handler)(ctx.request).await;

        let mut head = Request::new(Body::empty());
        *head.method_mut() = method;
        *head.uri_mut() = uri;
        *head.version_mut() = version;
        *head.headers_mut() = headers;

        let mut ctx = FilterContext {
            request: head,
            response: Some(response),
        };

        for filter in &self.after {
            match filter.call(ctx).await {
                FilterFlow::Continue(next) => ctx = next,
                FilterFlow::Halt(response) => return response,
            }
        }

        match ctx.response {
            Some(response) => response,
            // An after filter dropped the response without halting.
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handler::{action, filter_fn};
    use std::sync::Mutex;

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    fn recording_filter(log: CallLog, tag: &'static str) -> ActionFilter {
        ActionFilter::new(filter_fn(move |ctx| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(tag);
                FilterFlow::Continue(ctx)
            }
        }))
    }

    fn recording_handler(log: CallLog) -> ActionFn {
        action(move |_req| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push("handler");
                "ok"
            }
        })
    }

    fn request() -> Request<Body> {
        Request::builder()
            .uri("/users")
            .body(Body::empty())
            .unwrap()
    }

    // ── Chain ordering ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_chain_runs_in_order() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let chain = Arc::new(RouteChain {
            auth: None,
            before: vec![
                recording_filter(log.clone(), "b1"),
                recording_filter(log.clone(), "b2"),
            ],
            handler: recording_handler(log.clone()),
            after: vec![recording_filter(log.clone(), "a1")],
        });

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*log.lock().unwrap(), vec!["b1", "b2", "handler", "a1"]);
    }

    #[tokio::test]
    async fn test_auth_runs_first() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let auth_log = log.clone();
        let chain = Arc::new(RouteChain {
            auth: Some(filter_fn(move |ctx| {
                let log = auth_log.clone();
                async move {
                    log.lock().unwrap().push("auth");
                    FilterFlow::Continue(ctx)
                }
            })),
            before: vec![recording_filter(log.clone(), "b1")],
            handler: recording_handler(log.clone()),
            after: vec![recording_filter(log.clone(), "a1")],
        });

        chain.run(request()).await;
        assert_eq!(*log.lock().unwrap(), vec!["auth", "b1", "handler", "a1"]);
    }

    // ── Halting ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_before_halt_skips_handler_and_after() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let halting = ActionFilter::new(filter_fn(|_ctx| async move {
            FilterFlow::Halt(StatusCode::FORBIDDEN.into_response())
        }));
        let chain = Arc::new(RouteChain {
            auth: None,
            before: vec![recording_filter(log.clone(), "b1"), halting],
            handler: recording_handler(log.clone()),
            after: vec![recording_filter(log.clone(), "a1")],
        });

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(*log.lock().unwrap(), vec!["b1"]);
    }

    #[tokio::test]
    async fn test_auth_halt_skips_everything() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let chain = Arc::new(RouteChain {
            auth: Some(filter_fn(|_ctx| async move {
                FilterFlow::Halt(StatusCode::UNAUTHORIZED.into_response())
            })),
            before: vec![recording_filter(log.clone(), "b1")],
            handler: recording_handler(log.clone()),
            after: vec![],
        });

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(log.lock().unwrap().is_empty());
    }

    // ── After phase ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_after_filter_sees_request_head_and_response() {
        let chain = Arc::new(RouteChain {
            auth: None,
            before: vec![],
            handler: action(|_req| async { "ok" }),
            after: vec![ActionFilter::new(filter_fn(|ctx| async move {
                assert_eq!(ctx.request.uri().path(), "/users");
                let response = ctx.response.as_ref().expect("response must be present");
                assert_eq!(response.status(), StatusCode::OK);
                FilterFlow::Continue(ctx)
            }))],
        });

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_after_filter_can_replace_response() {
        let chain = Arc::new(RouteChain {
            auth: None,
            before: vec![],
            handler: action(|_req| async { "ok" }),
            after: vec![ActionFilter::new(filter_fn(|mut ctx| async move {
                ctx.response = Some(StatusCode::CREATED.into_response());
                FilterFlow::Continue(ctx)
            }))],
        });

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_dropped_response_yields_internal_error() {
        let chain = Arc::new(RouteChain {
            auth: None,
            before: vec![],
            handler: action(|_req| async { "ok" }),
            after: vec![ActionFilter::new(filter_fn(|mut ctx| async move {
                ctx.response = None;
                FilterFlow::Continue(ctx)
            }))],
        });

        let response = chain.run(request()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
