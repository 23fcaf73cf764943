//! Routes configuration loading and management
//!
//! A route layout can live in YAML next to the code that provides the
//! handler modules. The config mirrors the builder-facing model as
//! plain data; joining it with registered [`HandlerModule`]s produces a
//! [`ResourceCollection`] ready for the builder.
//!
//! ```yaml
//! global_path_prefix: /api
//! resources:
//!   - name: users
//!     endpoints:
//!       - { method: GET, path: "", name: list }
//!       - { method: GET, path: "/{id}", name: get }
//!       - { method: POST, path: "", name: create }
//! ```

use crate::collection::{ActionMethod, Endpoint, HandlerModule, Resource, ResourceCollection};
use crate::core::error::{ConfigError, RouterError, RouterResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One endpoint entry in the routes config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// HTTP verb, e.g. "GET" (case-insensitive)
    pub method: String,

    /// Path suffix appended after `/{resource}`, e.g. "/{id}"
    #[serde(default)]
    pub path: String,

    /// Action name resolved on the registered handler module
    pub name: String,
}

/// One resource entry: name plus its endpoints in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub name: String,
    pub endpoints: Vec<EndpointConfig>,
}

/// Complete route layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Prefix prepended to every computed path
    #[serde(default)]
    pub global_path_prefix: Option<String>,

    /// Resources in document order
    pub resources: Vec<ResourceConfig>,
}

impl RoutesConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> RouterResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RouterError::Config(ConfigError::FileNotFound {
                    path: path.to_string(),
                })
            } else {
                RouterError::Config(ConfigError::IoError {
                    message: err.to_string(),
                })
            }
        })?;
        serde_yaml::from_str(&content).map_err(|err| {
            RouterError::Config(ConfigError::ParseError {
                file: Some(path.to_string()),
                message: err.to_string(),
            })
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> RouterResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Join the parsed layout with registered handler modules.
    ///
    /// Every resource in the config must have a module registered under
    /// the same name, and endpoint verbs are parsed here, so a bad
    /// layout fails before the builder ever runs.
    pub fn into_collection(
        self,
        mut modules: IndexMap<String, HandlerModule>,
    ) -> RouterResult<ResourceCollection> {
        let mut collection = ResourceCollection::new();
        if let Some(prefix) = self.global_path_prefix {
            collection = collection.global_path_prefix(prefix);
        }

        for resource_config in self.resources {
            let module = modules.shift_remove(&resource_config.name).ok_or_else(|| {
                ConfigError::MissingModule {
                    resource: resource_config.name.clone(),
                }
            })?;

            let mut resource = Resource::new(module);
            for endpoint in resource_config.endpoints {
                let method: ActionMethod = endpoint.method.parse()?;
                resource = resource.endpoint(Endpoint::new(method, endpoint.path, endpoint.name));
            }
            collection = collection.resource(resource_config.name, resource);
        }

        Ok(collection)
    }
}
