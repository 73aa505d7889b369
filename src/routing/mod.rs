//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at install / reload):
//!     RouteDefinition[]
//!     → combinator.rs (resolve specs via registry.rs, AND them)
//!     → table.rs (freeze as immutable RouteTable)
//!     → matcher.rs (atomic swap of the active table)
//!
//! Incoming Request:
//!     → context.rs (RequestContext: method, path, headers, ...)
//!     → matcher.rs (scan routes in order, evaluate conjunctions)
//!     → validation hook
//!     → Return: matched route, none, or RouteError
//! ```
//!
//! # Design Decisions
//! - Predicates built once per installed route set, reused per request
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - Broken routes fail the scan when reached, never silently skipped

pub mod combinator;
pub mod context;
pub mod definition;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod predicate;
pub mod registry;
pub mod table;

pub use combinator::PredicateCombinator;
pub use context::{RequestContext, RouteMatch};
pub use definition::{PredicateSpec, RouteDefinition};
pub use error::{ConfigurationError, RouteError, RouteResult, ValidationError};
pub use matcher::{NoopValidator, RouteMatcher, RouteValidator};
pub use predicate::{BoxPredicate, Conjunction, FnPredicate, InvalidArgs, Predicate, PredicateFactory};
pub use registry::PredicateFactoryRegistry;
pub use table::RouteTable;
