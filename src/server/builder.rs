//! ResourcefulRouterBuilder for turning a resource collection into an
//! axum router

use super::dispatch::RouteChain;
use crate::collection::{ActionMethod, ResourceCollection};
use crate::core::error::{ConfigError, RouterResult};
use crate::core::filter::select_filters;
use crate::core::handler::FilterFn;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::MethodRouter;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Which identifier filter `except`/`only` lists are matched against.
///
/// The default matches the endpoint's action name, so a filter list
/// like `only(["create", "update"])` picks individual actions.
/// `ResourceName` matches the owning resource's name instead, so one
/// filter entry can switch a whole resource on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterIdentifier {
    #[default]
    ActionName,
    ResourceName,
}

/// Builder that walks a [`ResourceCollection`] and registers every
/// endpoint on a fresh [`Router`].
///
/// Construction is synchronous and single-pass: no I/O, no server
/// start. The returned router is immutable after construction; rebuild
/// by calling [`build`](Self::build) again with a fresh collection.
///
/// # Example
///
/// ```rust,ignore
/// let app = ResourcefulRouterBuilder::new()
///     .with_auth(check_api_key)
///     .build(&collection)?;
///
/// let listener = TcpListener::bind("127.0.0.1:3000").await?;
/// axum::serve(listener, app).await?;
/// ```
pub struct ResourcefulRouterBuilder {
    filter_identifier: FilterIdentifier,
    auth: Option<FilterFn>,
}

impl ResourcefulRouterBuilder {
    /// Create a new builder with action-name filter semantics and no
    /// global auth.
    pub fn new() -> Self {
        Self {
            filter_identifier: FilterIdentifier::default(),
            auth: None,
        }
    }

    /// Choose which identifier filters are matched against.
    pub fn filter_by(mut self, identifier: FilterIdentifier) -> Self {
        self.filter_identifier = identifier;
        self
    }

    /// Mount a global authentication filter.
    ///
    /// It runs first on every registered route, unconditionally, and is
    /// unaffected by per-action `except`/`only` lists.
    pub fn with_auth(mut self, auth: FilterFn) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the router.
    ///
    /// Resources are visited in insertion order, endpoints within a
    /// resource likewise. Any malformed endpoint aborts the whole
    /// build; no partial router is returned.
    pub fn build(&self, collection: &ResourceCollection) -> RouterResult<Router> {
        let mut routes: IndexMap<String, MethodRouter> = IndexMap::new();
        let mut registered: HashSet<(String, ActionMethod)> = HashSet::new();

        for (resource_name, resource) in collection.resources() {
            let module = resource.handler();

            for endpoint in resource.endpoints() {
                let handler = module
                    .get_action(&endpoint.name)
                    .ok_or_else(|| ConfigError::MissingHandler {
                        resource: resource_name.to_string(),
                        action: endpoint.name.clone(),
                    })?
                    .clone();

                let path = compose_path(
                    collection.global_prefix(),
                    module.prefix(),
                    resource_name,
                    &endpoint.path,
                );

                // axum panics on duplicate (path, method) registrations
                // instead of keeping both, so first-match-wins is
                // enforced here: later duplicates are skipped.
                if !registered.insert((path.clone(), endpoint.method)) {
                    tracing::warn!(
                        path = %path,
                        method = %endpoint.method,
                        "duplicate route registration skipped; first registration wins"
                    );
                    continue;
                }

                let identifier = match self.filter_identifier {
                    FilterIdentifier::ActionName => endpoint.name.as_str(),
                    FilterIdentifier::ResourceName => resource_name,
                };

                let chain = Arc::new(RouteChain {
                    auth: self.auth.clone(),
                    before: select_filters(identifier, module.before_filters()),
                    handler,
                    after: select_filters(identifier, module.after_filters()),
                });

                tracing::debug!(
                    path = %path,
                    method = %endpoint.method,
                    resource = resource_name,
                    action = %endpoint.name,
                    before = chain.before.len(),
                    after = chain.after.len(),
                    "registered route"
                );

                let route_handler = move |req: Request<Body>| {
                    let chain = chain.clone();
                    async move { chain.run(req).await }
                };

                let entry = routes.entry(path).or_default();
                let method_router = std::mem::take(entry);
                *entry = match endpoint.method {
                    ActionMethod::All => method_router.fallback(route_handler),
                    ActionMethod::Get => method_router.get(route_handler),
                    ActionMethod::Post => method_router.post(route_handler),
                    ActionMethod::Put => method_router.put(route_handler),
                    ActionMethod::Delete => method_router.delete(route_handler),
                    ActionMethod::Patch => method_router.patch(route_handler),
                    ActionMethod::Options => method_router.options(route_handler),
                    ActionMethod::Head => method_router.head(route_handler),
                };
            }
        }

        let mut router = Router::new();
        for (path, method_router) in routes {
            router = router.route(&path, method_router);
        }
        Ok(router)
    }

    /// Build the router and serve it with graceful shutdown.
    ///
    /// Binds to `addr`, serves requests, and handles SIGTERM and Ctrl+C.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// ResourcefulRouterBuilder::new()
    ///     .serve(&collection, "127.0.0.1:3000")
    ///     .await?;
    /// ```
    pub async fn serve(&self, collection: &ResourceCollection, addr: &str) -> anyhow::Result<()> {
        let app = self.build(collection)?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ResourcefulRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose the final route path.
///
/// Order is fixed: global prefix, module prefix, `/{resource_name}`,
/// endpoint path. Empty or missing prefixes contribute nothing.
fn compose_path(
    global_prefix: Option<&str>,
    module_prefix: Option<&str>,
    resource_name: &str,
    endpoint_path: &str,
) -> String {
    let mut path = String::new();
    if let Some(prefix) = global_prefix {
        path.push_str(prefix);
    }
    if let Some(prefix) = module_prefix {
        path.push_str(prefix);
    }
    path.push('/');
    path.push_str(resource_name);
    path.push_str(endpoint_path);
    path
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Endpoint, HandlerModule, Resource};
    use crate::core::error::RouterError;
    use crate::core::handler::action;

    fn stub_module() -> HandlerModule {
        HandlerModule::new()
            .action("list", action(|_req| async { "list" }))
            .action("get", action(|_req| async { "get" }))
    }

    // ── compose_path ─────────────────────────────────────────────────────

    #[test]
    fn test_compose_path_all_prefixes() {
        assert_eq!(
            compose_path(Some("/api"), Some("/v1"), "users", "/:id"),
            "/api/v1/users/:id"
        );
    }

    #[test]
    fn test_compose_path_no_prefixes() {
        assert_eq!(compose_path(None, None, "users", "/:id"), "/users/:id");
    }

    #[test]
    fn test_compose_path_empty_prefixes_contribute_nothing() {
        assert_eq!(compose_path(Some(""), Some(""), "users", "/:id"), "/users/:id");
    }

    #[test]
    fn test_compose_path_empty_endpoint_path() {
        assert_eq!(compose_path(Some("/api"), None, "users", ""), "/api/users");
    }

    // ── build ────────────────────────────────────────────────────────────

    #[test]
    fn test_build_empty_collection() {
        let router = ResourcefulRouterBuilder::new()
            .build(&ResourceCollection::new())
            .expect("empty collection should build");
        let _ = router;
    }

    #[test]
    fn test_build_produces_router() {
        let collection = ResourceCollection::new().resource(
            "users",
            Resource::new(stub_module())
                .endpoint(Endpoint::new(ActionMethod::Get, "", "list"))
                .endpoint(Endpoint::new(ActionMethod::Get, "/{id}", "get")),
        );
        let router = ResourcefulRouterBuilder::new()
            .build(&collection)
            .expect("build should produce a Router");
        let _ = router;
    }

    #[test]
    fn test_build_missing_handler_fails() {
        let collection = ResourceCollection::new().resource(
            "users",
            Resource::new(stub_module())
                .endpoint(Endpoint::new(ActionMethod::Get, "", "list"))
                .endpoint(Endpoint::new(ActionMethod::Delete, "/{id}", "destroy")),
        );
        let result: RouterResult<Router> = ResourcefulRouterBuilder::new().build(&collection);
        assert!(matches!(
            result,
            Err(RouterError::Config(ConfigError::MissingHandler { ref resource, ref action }))
                if resource == "users" && action == "destroy"
        ));
    }

    #[test]
    fn test_build_duplicate_route_does_not_panic() {
        // Two endpoints computing the same (path, verb) pair: the first
        // registration wins, the second is skipped instead of tripping
        // axum's duplicate-route panic. Which one answers is covered by
        // the integration tests.
        let module = HandlerModule::new()
            .action("list", action(|_req| async { "list" }))
            .action("all", action(|_req| async { "all" }));
        let collection = ResourceCollection::new().resource(
            "users",
            Resource::new(module)
                .endpoint(Endpoint::new(ActionMethod::Get, "", "list"))
                .endpoint(Endpoint::new(ActionMethod::Get, "", "all")),
        );
        let router = ResourcefulRouterBuilder::new().build(&collection);
        assert!(router.is_ok());
    }

    #[test]
    fn test_build_same_path_different_verbs() {
        let module = HandlerModule::new()
            .action("list", action(|_req| async { "list" }))
            .action("create", action(|_req| async { "create" }));
        let collection = ResourceCollection::new().resource(
            "users",
            Resource::new(module)
                .endpoint(Endpoint::new(ActionMethod::Get, "", "list"))
                .endpoint(Endpoint::new(ActionMethod::Post, "", "create")),
        );
        let router = ResourcefulRouterBuilder::new().build(&collection);
        assert!(router.is_ok());
    }
}
