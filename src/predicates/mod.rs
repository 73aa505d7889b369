//! Built-in predicate factories.
//!
//! | Name | value | args |
//! |------|-------|------|
//! | `Path` | Ant path pattern | more patterns |
//! | `Host` | Ant host pattern | more patterns |
//! | `Method` | HTTP method | more methods |
//! | `Header` | header name | optional regex |
//! | `Query` | parameter name | optional regex |
//! | `Cookie` | cookie name | regex |
//! | `RemoteAddr` | IP or CIDR | more IPs/CIDRs |
//!
//! Regular expressions must match the whole value. The shortcut form
//! `Name=value,arg` splits on every comma, so a regex that contains one
//! (`\d{1,3}`) has to be written in the table form with an explicit `args`
//! list. Header, Query and Cookie reject extra arguments.

use std::sync::Arc;

use regex::Regex;

use crate::routing::predicate::{InvalidArgs, PredicateFactory};

pub mod cookie;
pub mod header;
pub mod host;
pub mod method;
pub mod path;
pub mod query;
pub mod remote_addr;

pub use cookie::CookiePredicateFactory;
pub use header::HeaderPredicateFactory;
pub use host::HostPredicateFactory;
pub use method::MethodPredicateFactory;
pub use path::PathPredicateFactory;
pub use query::QueryPredicateFactory;
pub use remote_addr::RemoteAddrPredicateFactory;

/// Every built-in factory under its registration name.
pub fn builtin_factories() -> Vec<(&'static str, Arc<dyn PredicateFactory>)> {
    vec![
        ("PathPredicateFactory", Arc::new(PathPredicateFactory) as Arc<dyn PredicateFactory>),
        ("HostPredicateFactory", Arc::new(HostPredicateFactory) as Arc<dyn PredicateFactory>),
        ("MethodPredicateFactory", Arc::new(MethodPredicateFactory) as Arc<dyn PredicateFactory>),
        ("HeaderPredicateFactory", Arc::new(HeaderPredicateFactory) as Arc<dyn PredicateFactory>),
        ("QueryPredicateFactory", Arc::new(QueryPredicateFactory) as Arc<dyn PredicateFactory>),
        ("CookiePredicateFactory", Arc::new(CookiePredicateFactory) as Arc<dyn PredicateFactory>),
        ("RemoteAddrPredicateFactory", Arc::new(RemoteAddrPredicateFactory) as Arc<dyn PredicateFactory>),
    ]
}

/// Compile `pattern` so it only matches entire values.
pub(crate) fn full_match(pattern: &str) -> Result<Regex, InvalidArgs> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| InvalidArgs::new(format!("invalid regex {:?}: {}", pattern, e)))
}

/// Optional regex taken from the only argument.
pub(crate) fn optional_regex(predicate: &str, args: &[String]) -> Result<Option<Regex>, InvalidArgs> {
    match args {
        [] => Ok(None),
        [pattern] => full_match(pattern).map(Some),
        _ => Err(surplus_args(predicate, args)),
    }
}

/// Error for a predicate given more regex arguments than it takes.
pub(crate) fn surplus_args(predicate: &str, args: &[String]) -> InvalidArgs {
    InvalidArgs::new(format!(
        "{} takes at most one regex, got {} arguments {:?}; use the table form for regexes containing ','",
        predicate,
        args.len(),
        args
    ))
}

/// `value` followed by `args`, skipping blanks.
pub(crate) fn value_and_args<'a>(value: &'a str, args: &'a [String]) -> impl Iterator<Item = &'a str> {
    std::iter::once(value)
        .chain(args.iter().map(String::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
