//! Request path predicate.

use crate::predicates::value_and_args;
use crate::routing::context::RequestContext;
use crate::routing::pattern::AntPattern;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

/// Holds when the path matches any of the patterns.
#[derive(Debug, Clone)]
pub struct PathPredicate {
    patterns: Vec<AntPattern>,
}

impl Predicate for PathPredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        let path = ctx.path();
        self.patterns.iter().any(|p| p.matches(path))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PathPredicateFactory;

impl PredicateFactory for PathPredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let patterns = value_and_args(value, args)
            .map(|p| {
                AntPattern::path(p).map_err(|e| InvalidArgs::new(format!("invalid path pattern {:?}: {}", p, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if patterns.is_empty() {
            return Err(InvalidArgs::new("Path requires a pattern"));
        }
        Ok(Box::new(PathPredicate { patterns }))
    }
}
