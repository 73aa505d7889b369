//! Builds a route's conjunctive predicate from its specs.

use crate::routing::definition::{PredicateSpec, RouteDefinition};
use crate::routing::error::ConfigurationError;
use crate::routing::predicate::{BoxPredicate, Conjunction};
use crate::routing::registry::PredicateFactoryRegistry;

/// Folds a route's predicate specs into one AND predicate.
#[derive(Debug, Clone, Copy)]
pub struct PredicateCombinator<'a> {
    registry: &'a PredicateFactoryRegistry,
}

impl<'a> PredicateCombinator<'a> {
    pub fn new(registry: &'a PredicateFactoryRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every spec of `route` and AND them in declaration order.
    ///
    /// The first spec that cannot be built aborts the whole route; the
    /// conjuncts built before it are dropped.
    pub fn combine(&self, route: &RouteDefinition) -> Result<Conjunction, ConfigurationError> {
        let (first, rest) = route
            .predicates
            .split_first()
            .ok_or(ConfigurationError::NoPredicates)?;

        let mut combined = Conjunction::new(self.lookup(route, first)?);
        for spec in rest {
            combined = combined.and(self.lookup(route, spec)?);
        }
        Ok(combined)
    }

    fn lookup(&self, route: &RouteDefinition, spec: &PredicateSpec) -> Result<BoxPredicate, ConfigurationError> {
        let factory = self.registry.lookup(&spec.name)?;

        tracing::debug!(
            route_id = %route.id,
            predicate = %spec.name,
            value = %spec.value,
            args = ?spec.args,
            "Applying predicate"
        );

        factory
            .apply(&spec.value, &spec.args)
            .map_err(|e| ConfigurationError::InvalidPredicate {
                name: spec.name.clone(),
                reason: e.to_string(),
            })
    }
}
