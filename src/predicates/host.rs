//! Host predicate.
//!
//! Host matching is case-insensitive (per HTTP spec); the port is ignored.

use crate::predicates::value_and_args;
use crate::routing::context::RequestContext;
use crate::routing::pattern::AntPattern;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

/// Holds when the request host matches any of the patterns.
#[derive(Debug, Clone)]
pub struct HostPredicate {
    patterns: Vec<AntPattern>,
}

impl Predicate for HostPredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        let Some(host) = ctx.host() else {
            return false;
        };
        if host.bytes().any(|b| b.is_ascii_uppercase()) {
            let host = host.to_ascii_lowercase();
            self.patterns.iter().any(|p| p.matches(&host))
        } else {
            self.patterns.iter().any(|p| p.matches(host))
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HostPredicateFactory;

impl PredicateFactory for HostPredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let patterns = value_and_args(value, args)
            .map(|p| {
                AntPattern::host(&p.to_ascii_lowercase())
                    .map_err(|e| InvalidArgs::new(format!("invalid host pattern {:?}: {}", p, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if patterns.is_empty() {
            return Err(InvalidArgs::new("Host requires a pattern"));
        }
        Ok(Box::new(HostPredicate { patterns }))
    }
}
