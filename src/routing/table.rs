//! Compiled route snapshots.
//!
//! # Responsibilities
//! - Build each route's conjunction once per installed route set
//! - Remember routes that could not be built so the scan can fail on them
//!
//! # Design Decisions
//! - Immutable after construction (shared between threads without locks)
//! - Order is preserved exactly; it is the match priority

use std::sync::Arc;

use crate::routing::combinator::PredicateCombinator;
use crate::routing::definition::RouteDefinition;
use crate::routing::error::ConfigurationError;
use crate::routing::predicate::Conjunction;
use crate::routing::registry::PredicateFactoryRegistry;

/// State of a compiled route.
#[derive(Debug)]
pub enum CompiledPredicate {
    /// No predicates declared: skipped during matching.
    Unmatchable,
    /// Ready to evaluate.
    Ready(Conjunction),
    /// Building failed; reaching this route aborts the match.
    Broken(ConfigurationError),
}

/// A route definition with its prebuilt predicate.
#[derive(Debug)]
pub struct CompiledRoute {
    definition: Arc<RouteDefinition>,
    predicate: CompiledPredicate,
}

impl CompiledRoute {
    pub fn definition(&self) -> &Arc<RouteDefinition> {
        &self.definition
    }

    pub fn predicate(&self) -> &CompiledPredicate {
        &self.predicate
    }
}

/// Ordered, immutable set of compiled routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// An empty table: every match returns none.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile `routes` against `registry`, keeping their order.
    pub fn compile(routes: Vec<RouteDefinition>, registry: &PredicateFactoryRegistry) -> Self {
        let combinator = PredicateCombinator::new(registry);
        let routes = routes
            .into_iter()
            .map(|definition| {
                let predicate = if definition.predicates.is_empty() {
                    tracing::debug!(route_id = %definition.id, "Route has no predicates, it will never match");
                    CompiledPredicate::Unmatchable
                } else {
                    match combinator.combine(&definition) {
                        Ok(conjunction) => CompiledPredicate::Ready(conjunction),
                        Err(e) => {
                            tracing::warn!(
                                route_id = %definition.id,
                                error = %e,
                                "Route predicates could not be built; matching will fail when this route is reached"
                            );
                            CompiledPredicate::Broken(e)
                        }
                    }
                };
                CompiledRoute {
                    definition: Arc::new(definition),
                    predicate,
                }
            })
            .collect();

        Self { routes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.routes.iter()
    }

    /// Route definitions in priority order.
    pub fn definitions(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter().map(|r| r.definition.as_ref())
    }

    /// Number of routes whose predicates failed to build.
    pub fn broken_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|r| matches!(r.predicate, CompiledPredicate::Broken(_)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
