//! HTTP method predicate.

use axum::http::Method;

use crate::predicates::value_and_args;
use crate::routing::context::RequestContext;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

#[derive(Debug, Clone)]
pub struct MethodPredicate {
    methods: Vec<Method>,
}

impl Predicate for MethodPredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        self.methods.contains(ctx.method())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MethodPredicateFactory;

impl PredicateFactory for MethodPredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let methods = value_and_args(value, args)
            .map(|m| {
                Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                    .map_err(|_| InvalidArgs::new(format!("invalid HTTP method {:?}", m)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if methods.is_empty() {
            return Err(InvalidArgs::new("Method requires at least one method"));
        }
        Ok(Box::new(MethodPredicate { methods }))
    }
}
