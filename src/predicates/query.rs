//! Query parameter predicate.

use regex::Regex;

use crate::predicates::optional_regex;
use crate::routing::context::RequestContext;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

#[derive(Debug, Clone)]
pub struct QueryPredicate {
    param: String,
    value: Option<Regex>,
}

impl Predicate for QueryPredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        let mut values = ctx.query_values(&self.param);
        match &self.value {
            None => values.next().is_some(),
            Some(re) => values.any(|v| re.is_match(&v)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QueryPredicateFactory;

impl PredicateFactory for QueryPredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let param = value.trim();
        if param.is_empty() {
            return Err(InvalidArgs::new("Query requires a parameter name"));
        }
        Ok(Box::new(QueryPredicate {
            param: param.to_string(),
            value: optional_regex("Query", args)?,
        }))
    }
}
