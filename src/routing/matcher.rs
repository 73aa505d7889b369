//! Route matching logic.
//!
//! # Responsibilities
//! - Scan routes in order and pick the first whose predicates all hold
//! - Run the validation hook on the winner
//! - Record the winner on the request context
//!
//! # Design Decisions
//! - First match wins; list order is the only priority
//! - Routes without predicates are skipped, never vacuously true
//! - Configuration and validation failures abort the scan (no fallback)
//! - Active routes live in an `ArcSwap` so reloads never block readers

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::combinator::PredicateCombinator;
use crate::routing::context::RequestContext;
use crate::routing::definition::RouteDefinition;
use crate::routing::error::{RouteError, RouteResult, ValidationError};
use crate::routing::predicate::Predicate;
use crate::routing::registry::PredicateFactoryRegistry;
use crate::routing::table::{CompiledPredicate, RouteTable};

/// Name written to the result slot unless configured otherwise.
pub const DEFAULT_MATCHER_NAME: &str = "RouteMatcher";

/// Hook run on a matched route before it is returned.
pub trait RouteValidator: Send + Sync {
    fn validate(&self, route: &RouteDefinition, ctx: &RequestContext) -> Result<(), ValidationError>;
}

/// Accepts every route.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopValidator;

impl RouteValidator for NoopValidator {
    fn validate(&self, _route: &RouteDefinition, _ctx: &RequestContext) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Resolves requests to routes.
pub struct RouteMatcher {
    name: String,
    registry: Arc<PredicateFactoryRegistry>,
    table: ArcSwap<RouteTable>,
    validator: Arc<dyn RouteValidator>,
}

impl std::fmt::Debug for RouteMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatcher")
            .field("name", &self.name)
            .field("routes", &self.table.load().len())
            .field("factories", &self.registry.len())
            .finish()
    }
}

impl RouteMatcher {
    /// Create a matcher with no routes installed.
    pub fn new(registry: Arc<PredicateFactoryRegistry>) -> Self {
        Self {
            name: DEFAULT_MATCHER_NAME.to_string(),
            registry,
            table: ArcSwap::from_pointee(RouteTable::empty()),
            validator: Arc::new(NoopValidator),
        }
    }

    /// Set the name recorded on matched requests.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the post-match validation hook.
    pub fn with_validator(mut self, validator: Arc<dyn RouteValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Arc<PredicateFactoryRegistry> {
        &self.registry
    }

    /// Compile `routes` and make them the active snapshot.
    ///
    /// Matches already in flight finish against the snapshot they loaded.
    pub fn install(&self, routes: Vec<RouteDefinition>) -> Arc<RouteTable> {
        let table = Arc::new(RouteTable::compile(routes, &self.registry));
        self.table.store(table.clone());
        tracing::info!(
            matcher = %self.name,
            routes = table.len(),
            broken = table.broken_count(),
            "Route table installed"
        );
        table
    }

    /// The active snapshot.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Match against the active snapshot.
    pub fn match_request(&self, ctx: &mut RequestContext) -> RouteResult<Option<Arc<RouteDefinition>>> {
        let table = self.table.load();
        self.match_in(&table, ctx)
    }

    /// Match against a specific snapshot using its prebuilt predicates.
    pub fn match_in(&self, table: &RouteTable, ctx: &mut RequestContext) -> RouteResult<Option<Arc<RouteDefinition>>> {
        for route in table.iter() {
            let definition = route.definition();
            let matched = match route.predicate() {
                CompiledPredicate::Unmatchable => continue,
                CompiledPredicate::Ready(predicate) => predicate.test(ctx),
                CompiledPredicate::Broken(e) => {
                    return Err(RouteError::Configuration {
                        route_id: definition.id.clone(),
                        source: e.clone(),
                    });
                }
            };

            if matched {
                self.accept(definition, ctx)?;
                return Ok(Some(definition.clone()));
            }
            tracing::trace!(route_id = %definition.id, "Route did not match");
        }

        tracing::trace!(request = %ctx.describe(), "No route found");
        Ok(None)
    }

    /// Match against a caller-supplied route list, building predicates as the
    /// scan reaches each route.
    pub fn match_routes<'r>(
        &self,
        routes: &'r [RouteDefinition],
        ctx: &mut RequestContext,
    ) -> RouteResult<Option<&'r RouteDefinition>> {
        let combinator = PredicateCombinator::new(&self.registry);

        for route in routes.iter().filter(|r| !r.predicates.is_empty()) {
            let predicate = combinator.combine(route).map_err(|source| RouteError::Configuration {
                route_id: route.id.clone(),
                source,
            })?;

            if predicate.test(ctx) {
                self.accept(route, ctx)?;
                return Ok(Some(route));
            }
            tracing::trace!(route_id = %route.id, "Route did not match");
        }

        tracing::trace!(request = %ctx.describe(), "No route found");
        Ok(None)
    }

    fn accept(&self, route: &RouteDefinition, ctx: &mut RequestContext) -> Result<(), ValidationError> {
        tracing::debug!(route_id = %route.id, "Route matched");
        self.validator.validate(route, ctx)?;
        ctx.set_route_match(&route.id, &self.name);
        tracing::debug!(request = %ctx.describe(), route_id = %route.id, "Mapping request to route");
        Ok(())
    }
}
