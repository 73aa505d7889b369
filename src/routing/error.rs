//! Route resolution error definitions.

use thiserror::Error;

/// A route references predicates the engine cannot build.
///
/// Raised while a route's conjunction is being assembled. Cloneable so a
/// compiled route table can hold it and re-raise it on every scan that
/// reaches the broken route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No factory is registered under this name.
    #[error("Unable to find PredicateFactory with name {name}")]
    UnknownPredicate { name: String },

    /// The factory exists but rejected the value/arguments it was given.
    #[error("Invalid arguments for predicate {name}: {reason}")]
    InvalidPredicate { name: String, reason: String },

    /// The route declares no predicates at all.
    #[error("Route has no predicates")]
    NoPredicates,
}

/// The post-match validation hook rejected a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Route {route_id} rejected by validation: {reason}")]
pub struct ValidationError {
    pub route_id: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(route_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a match call.
///
/// Neither kind is recovered locally: the scan stops at the offending route
/// and no later route is tried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Route {route_id}: {source}")]
    Configuration {
        route_id: String,
        #[source]
        source: ConfigurationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RouteError {
    /// Id of the route that caused the failure.
    pub fn route_id(&self) -> &str {
        match self {
            RouteError::Configuration { route_id, .. } => route_id,
            RouteError::Validation(err) => &err.route_id,
        }
    }
}

/// Result type for match operations.
pub type RouteResult<T> = Result<T, RouteError>;
