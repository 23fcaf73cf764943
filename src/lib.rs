//! # Resourceful Router
//!
//! Declarative resourceful routing for axum: describe resources, their
//! endpoints, and their handler functions once, and get a fully wired
//! `axum::Router` back.
//!
//! ## Features
//!
//! - **Declarative Resources**: resources → endpoints → handler actions,
//!   registered in insertion order
//! - **Conditional Filters**: before/after middleware with `except`/`only`
//!   inclusion rules, matched by action name or resource name
//! - **Deterministic Paths**: `global_prefix + module_prefix + /resource +
//!   endpoint_path`, composed the same way every build
//! - **Global Auth**: an optional authentication filter mounted first on
//!   every route, unaffected by per-action filters
//! - **Fail-Fast Builds**: unknown verbs and unresolvable action names
//!   abort the build; no partial router ever escapes
//! - **YAML Layouts**: optional routes config joined with code-registered
//!   handler modules
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resourceful::prelude::*;
//!
//! let audit = ActionFilter::new(filter_fn(|ctx| async move {
//!     tracing::info!("{} {}", ctx.request.method(), ctx.request.uri());
//!     FilterFlow::Continue(ctx)
//! }))
//! .except(["list"]);
//!
//! let users = HandlerModule::new()
//!     .before(audit)
//!     .action("list", action(|_req| async { "[]" }))
//!     .action("get", action(|_req| async { "{}" }));
//!
//! let collection = ResourceCollection::new()
//!     .global_path_prefix("/api")
//!     .resource(
//!         "users",
//!         Resource::new(users)
//!             .endpoint(Endpoint::new(ActionMethod::Get, "", "list"))
//!             .endpoint(Endpoint::new(ActionMethod::Get, "/{id}", "get")),
//!     );
//!
//! let app = ResourcefulRouterBuilder::new().build(&collection)?;
//! // GET /api/users and GET /api/users/{id} are now mounted.
//! ```

pub mod collection;
pub mod config;
pub mod core;
pub mod server;

/// Re-exports of commonly used types and functions
pub mod prelude {
    // === Data model ===
    pub use crate::collection::{
        ActionMethod, Endpoint, HandlerModule, Resource, ResourceCollection,
    };

    // === Core ===
    pub use crate::core::{
        error::{ConfigError, RouterError, RouterResult},
        filter::{ActionFilter, select_filters},
        handler::{ActionFn, FilterContext, FilterFlow, FilterFn, action, filter_fn},
    };

    // === Config ===
    pub use crate::config::{EndpointConfig, ResourceConfig, RoutesConfig};

    // === Server ===
    pub use crate::server::{FilterIdentifier, ResourcefulRouterBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use indexmap::IndexMap;

    // === Axum ===
    pub use axum::{Router, body::Body, http::Request, response::IntoResponse};
}
