//! Declarative resource collection model
//!
//! A [`ResourceCollection`] maps resource names to [`Resource`]s; each
//! resource maps endpoint names to [`Endpoint`]s and carries one
//! [`HandlerModule`] shared by all of its endpoints. All maps preserve
//! insertion order, which is the order the router builder registers
//! routes in.
//!
//! Handler resolution is an explicit action-name-to-function map,
//! validated when the router is built rather than at request time.

use crate::core::error::ConfigError;
use crate::core::filter::ActionFilter;
use crate::core::handler::ActionFn;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The HTTP verbs an endpoint may bind to.
///
/// `All` matches every method (the method router's fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionMethod {
    All,
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl ActionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionMethod::All => "ALL",
            ActionMethod::Get => "GET",
            ActionMethod::Post => "POST",
            ActionMethod::Put => "PUT",
            ActionMethod::Delete => "DELETE",
            ActionMethod::Patch => "PATCH",
            ActionMethod::Options => "OPTIONS",
            ActionMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for ActionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(ActionMethod::All),
            "GET" => Ok(ActionMethod::Get),
            "POST" => Ok(ActionMethod::Post),
            "PUT" => Ok(ActionMethod::Put),
            "DELETE" => Ok(ActionMethod::Delete),
            "PATCH" => Ok(ActionMethod::Patch),
            "OPTIONS" => Ok(ActionMethod::Options),
            "HEAD" => Ok(ActionMethod::Head),
            other => Err(ConfigError::UnknownMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// One (verb, path-suffix, action-name) triple within a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: ActionMethod,

    /// Partial URL segment appended after `/{resource_name}`.
    #[serde(default)]
    pub path: String,

    /// Action name; must resolve to an action on the resource's
    /// handler module.
    pub name: String,
}

impl Endpoint {
    pub fn new(method: ActionMethod, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Action-name-to-handler table plus lifecycle filters for a resource.
///
/// # Example
///
/// ```rust,ignore
/// let users = HandlerModule::new()
///     .path_prefix("/v1")
///     .before(require_auth.except(["list"]))
///     .action("list", action(|_req| async { "[]" }))
///     .action("get", action(get_user));
/// ```
#[derive(Clone, Default)]
pub struct HandlerModule {
    actions: IndexMap<String, ActionFn>,
    before: Vec<ActionFilter>,
    after: Vec<ActionFilter>,
    path_prefix: Option<String>,
}

impl HandlerModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action handler under a name. A later registration
    /// under the same name replaces the earlier one.
    pub fn action(mut self, name: impl Into<String>, handler: ActionFn) -> Self {
        self.actions.insert(name.into(), handler);
        self
    }

    /// Append a before filter. Filters run in the order they are added.
    pub fn before(mut self, filter: ActionFilter) -> Self {
        self.before.push(filter);
        self
    }

    /// Append an after filter. Filters run in the order they are added.
    pub fn after(mut self, filter: ActionFilter) -> Self {
        self.after.push(filter);
        self
    }

    /// Path segment mounted between the global prefix and the resource
    /// name.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    pub fn get_action(&self, name: &str) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn before_filters(&self) -> &[ActionFilter] {
        &self.before
    }

    pub fn after_filters(&self) -> &[ActionFilter] {
        &self.after
    }

    pub fn prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }
}

impl fmt::Debug for HandlerModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerModule")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}

/// A named group of endpoints sharing one handler module.
#[derive(Clone, Default)]
pub struct Resource {
    endpoints: IndexMap<String, Endpoint>,
    handler: HandlerModule,
}

impl Resource {
    pub fn new(handler: HandlerModule) -> Self {
        Self {
            endpoints: IndexMap::new(),
            handler,
        }
    }

    /// Add an endpoint, keyed by its action name. A later endpoint with
    /// the same name replaces the earlier one.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.insert(endpoint.name.clone(), endpoint);
        self
    }

    /// Endpoints in insertion order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    pub fn handler(&self) -> &HandlerModule {
        &self.handler
    }
}

/// The full declarative description handed to the router builder.
///
/// Constructed once by the caller; the builder only reads it.
#[derive(Clone, Default)]
pub struct ResourceCollection {
    resources: IndexMap<String, Resource>,
    global_path_prefix: Option<String>,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named resource. Registration order is preserved.
    pub fn resource(mut self, name: impl Into<String>, resource: Resource) -> Self {
        self.resources.insert(name.into(), resource);
        self
    }

    /// Prefix prepended to every computed path.
    pub fn global_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.global_path_prefix = Some(prefix.into());
        self
    }

    /// Resources in insertion order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources
            .iter()
            .map(|(name, resource)| (name.as_str(), resource))
    }

    pub fn global_prefix(&self) -> Option<&str> {
        self.global_path_prefix.as_deref()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
