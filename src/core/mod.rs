//! Core module containing the filter selection logic, handler
//! callables, and error types

pub mod error;
pub mod filter;
pub mod handler;

pub use error::{ConfigError, RouterError, RouterResult};
pub use filter::{ActionFilter, select_filters};
pub use handler::{ActionFn, FilterContext, FilterFlow, FilterFn, action, filter_fn};
