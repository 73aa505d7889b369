//! Predicate-based route resolution.
//!
//! Picks the first route, in declaration order, whose predicates all hold for
//! a request. Predicates come from a registry of named factories; route sets
//! are compiled once and swapped atomically on reload.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod predicates;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use lifecycle::Shutdown;
pub use routing::{
    ConfigurationError, PredicateFactoryRegistry, PredicateSpec, RequestContext, RouteDefinition, RouteError,
    RouteMatcher, ValidationError,
};
