//! Typed error handling for router construction
//!
//! Construction is synchronous and one-shot, so every error here is a
//! build-time error: a failed build must prevent server startup rather
//! than silently omitting routes. Filter evaluation is total and has no
//! error type of its own.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: malformed route configuration (unknown verb,
//!   unresolvable action name, missing handler module, parse failures)
//!
//! # Example
//!
//! ```rust,ignore
//! match builder.build(&collection) {
//!     Ok(router) => router,
//!     Err(RouterError::Config(ConfigError::MissingHandler { resource, action })) => {
//!         panic!("endpoint '{}' on '{}' has no handler", action, resource);
//!     }
//!     Err(e) => panic!("build failed: {}", e),
//! }
//! ```

use std::fmt;

/// The main error type for the resourceful router.
///
/// Every failure is a configuration error today; the enum leaves room
/// for other categories without breaking callers that match on it.
#[derive(Debug)]
pub enum RouterError {
    /// Configuration errors (route layout, endpoint wiring)
    Config(ConfigError),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Config(e) => Some(e),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to route configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Endpoint declares an HTTP verb outside the supported set
    UnknownMethod { method: String },

    /// Endpoint name does not resolve to an action on its handler module
    MissingHandler { resource: String, action: String },

    /// Routes config names a resource with no registered handler module
    MissingModule { resource: String },

    /// Failed to parse a routes config document
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Routes config file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownMethod { method } => {
                write!(
                    f,
                    "Unknown HTTP method '{}' (expected one of ALL, GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD)",
                    method
                )
            }
            ConfigError::MissingHandler { resource, action } => {
                write!(
                    f,
                    "Endpoint '{}' on resource '{}' does not resolve to an action on its handler module",
                    action, resource
                )
            }
            ConfigError::MissingModule { resource } => {
                write!(f, "No handler module registered for resource '{}'", resource)
            }
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse routes config '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse routes config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Routes config file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for RouterError {
    fn from(err: ConfigError) -> Self {
        RouterError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for RouterError {
    fn from(err: serde_yaml::Error) -> Self {
        RouterError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for RouterError {
    fn from(err: std::io::Error) -> Self {
        RouterError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for router construction.
pub type RouterResult<T> = Result<T, RouterError>;

// =============================================================================
// Tests
// =============================================================================
