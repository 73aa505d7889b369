//! Cookie predicate.

use regex::Regex;

use crate::predicates::{full_match, surplus_args};
use crate::routing::context::RequestContext;
use crate::routing::predicate::{BoxPredicate, InvalidArgs, Predicate, PredicateFactory};

#[derive(Debug, Clone)]
pub struct CookiePredicate {
    name: String,
    value: Regex,
}

impl Predicate for CookiePredicate {
    fn test(&self, ctx: &RequestContext) -> bool {
        ctx.cookie_values(&self.name).any(|v| self.value.is_match(v))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CookiePredicateFactory;

impl PredicateFactory for CookiePredicateFactory {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let name = value.trim();
        if name.is_empty() {
            return Err(InvalidArgs::new("Cookie requires a cookie name"));
        }
        let pattern = match args {
            [pattern] => pattern,
            [] => return Err(InvalidArgs::new("Cookie requires a value regex")),
            _ => return Err(surplus_args("Cookie", args)),
        };
        Ok(Box::new(CookiePredicate {
            name: name.to_string(),
            value: full_match(pattern)?,
        }))
    }
}
