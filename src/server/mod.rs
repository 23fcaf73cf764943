//! Router construction from a declarative resource collection

pub mod builder;
pub mod dispatch;

pub use builder::{FilterIdentifier, ResourcefulRouterBuilder};
pub use dispatch::RouteChain;
