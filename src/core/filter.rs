//! Conditional action filters and the selection rule
//!
//! A filter is a request-handling callable plus optional `except` /
//! `only` identifier lists. [`select_filters`] computes the ordered
//! subset of a filter list that applies to a given identifier (an
//! action name or a resource name; the caller decides which semantics
//! to use).

use super::handler::{FilterContext, FilterFlow, FilterFn};
use std::fmt;

/// Middleware conditionally applied based on inclusion/exclusion lists.
///
/// Built through consuming builder calls; immutable afterwards.
///
/// # Example
///
/// ```rust,ignore
/// let require_auth = ActionFilter::new(check_token).except(["list", "get"]);
/// let audit = ActionFilter::new(write_audit_log).only(["remove"]);
/// ```
#[derive(Clone)]
pub struct ActionFilter {
    handler: FilterFn,
    except: Option<Vec<String>>,
    only: Option<Vec<String>>,
}

impl ActionFilter {
    /// Wrap a bare handler into an unconditional filter.
    pub fn new(handler: FilterFn) -> Self {
        Self {
            handler,
            except: None,
            only: None,
        }
    }

    /// Exclude the given identifiers. Checked before `only`.
    pub fn except<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(identifiers.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict the filter to exactly the given identifiers.
    pub fn only<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(identifiers.into_iter().map(Into::into).collect());
        self
    }

    /// Whether this filter applies to the given identifier.
    ///
    /// `except` is a hard exclude and wins over `only`; a filter with
    /// neither list always applies.
    pub fn applies_to(&self, identifier: &str) -> bool {
        if let Some(except) = &self.except {
            if except.iter().any(|name| name == identifier) {
                return false;
            }
        }
        if let Some(only) = &self.only {
            if !only.iter().any(|name| name == identifier) {
                return false;
            }
        }
        true
    }

    /// Invoke the wrapped handler.
    pub async fn call(&self, ctx: FilterContext) -> FilterFlow {
        (self.handler)(ctx).await
    }
}

impl fmt::Debug for ActionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionFilter")
            .field("except", &self.except)
            .field("only", &self.only)
            .finish_non_exhaustive()
    }
}

/// Select the filters that apply to `identifier`, preserving list order.
///
/// Pure and total: never fails, an empty filter list yields an empty
/// result. Surviving filters keep their relative order from the input.
pub fn select_filters(identifier: &str, filters: &[ActionFilter]) -> Vec<ActionFilter> {
    filters
        .iter()
        .filter(|filter| filter.applies_to(identifier))
        .cloned()
        .collect()
}
