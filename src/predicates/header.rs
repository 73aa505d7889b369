//! Header predicate.

use axum::http::HeaderName;
use regex::Regex;

use crate::predicates::optional_regex;
use crate::routing::context::RequestContext;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

/// Holds when the header is present and, if a regex was given, one of its
/// values matches it.
#[derive(Debug, Clone)]
pub struct HeaderPredicate {
    name: HeaderName,
    value: Option<Regex>,
}

impl Predicate for HeaderPredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        let mut values = ctx.headers().get_all(&self.name).iter();
        match &self.value {
            None => values.next().is_some(),
            Some(re) => values.any(|v| v.to_str().map(|s| re.is_match(s)).unwrap_or(false)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderPredicateFactory;

impl PredicateFactory for HeaderPredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let name = HeaderName::from_bytes(value.trim().as_bytes())
            .map_err(|_| InvalidArgs::new(format!("invalid header name {:?}", value)))?;
        Ok(Box::new(HeaderPredicate {
            name,
            value: optional_regex("Header", args)?,
        }))
    }
}
