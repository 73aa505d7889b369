//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route ids present and unique
//! - Every predicate resolvable and buildable against the registry
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: (GatewayConfig, registry) → Result<(), Vec<ConfigIssue>>
//! - Runs before config is accepted into the system
//! - Routes without predicates are allowed (they never match) but logged

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::routing::combinator::PredicateCombinator;
use crate::routing::error::ConfigurationError;
use crate::routing::registry::PredicateFactoryRegistry;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("route #{index} has an empty id")]
    EmptyRouteId { index: usize },

    #[error("duplicate route id {id}")]
    DuplicateRouteId { id: String },

    #[error("route {route_id}: {source}")]
    Predicate {
        route_id: String,
        #[source]
        source: ConfigurationError,
    },
}

/// Check `config` against `registry`.
pub fn validate_config(config: &GatewayConfig, registry: &PredicateFactoryRegistry) -> Result<(), Vec<ConfigIssue>> {
    let combinator = PredicateCombinator::new(registry);
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.id.trim().is_empty() {
            issues.push(ConfigIssue::EmptyRouteId { index });
        } else if !seen.insert(route.id.as_str()) {
            issues.push(ConfigIssue::DuplicateRouteId { id: route.id.clone() });
        }

        if route.predicates.is_empty() {
            tracing::warn!(route_id = %route.id, "Route has no predicates and will never match");
            continue;
        }
        if let Err(source) = combinator.combine(route) {
            issues.push(ConfigIssue::Predicate {
                route_id: route.id.clone(),
                source,
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::definition::RouteDefinition;

    fn config(routes: Vec<RouteDefinition>) -> GatewayConfig {
        GatewayConfig {
            routes,
            ..Default::default()
        }
    }

    fn route(id: &str, specs: &[&str]) -> RouteDefinition {
        RouteDefinition::new(id, specs.iter().map(|s| s.parse().unwrap()).collect())
    }

    #[test]
    fn test_valid_config() {
        let registry = PredicateFactoryRegistry::with_builtins();
        let cfg = config(vec![route("a", &["Path=/a/**"]), route("b", &[])]);
        assert!(validate_config(&cfg, &registry).is_ok());
    }

    #[test]
    fn test_reports_every_issue() {
        let registry = PredicateFactoryRegistry::with_builtins();
        let cfg = config(vec![
            route("", &["Path=/"]),
            route("dup", &["Path=/"]),
            route("dup", &["Unknown=x"]),
            route("bad", &["Method=NOT A METHOD"]),
        ]);

        let issues = validate_config(&cfg, &registry).unwrap_err();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0], ConfigIssue::EmptyRouteId { index: 0 });
        assert_eq!(issues[1], ConfigIssue::DuplicateRouteId { id: "dup".into() });
        assert_eq!(
            issues[2],
            ConfigIssue::Predicate {
                route_id: "dup".into(),
                source: ConfigurationError::UnknownPredicate { name: "Unknown".into() },
            }
        );
        assert!(matches!(issues[3], ConfigIssue::Predicate { ref route_id, .. } if route_id == "bad"));
    }
}
