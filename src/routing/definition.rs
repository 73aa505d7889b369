//! Route and predicate definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A route: an id plus the predicates that must all hold for it to match.
///
/// A route without predicates never matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteDefinition {
    /// Route identifier, unique within the active route set.
    pub id: String,

    /// Predicates in evaluation order.
    #[serde(default)]
    pub predicates: Vec<PredicateSpec>,
}

impl RouteDefinition {
    pub fn new(id: impl Into<String>, predicates: Vec<PredicateSpec>) -> Self {
        Self {
            id: id.into(),
            predicates,
        }
    }
}

/// One predicate reference: factory name, value and optional arguments.
///
/// Deserializes either from a table or from the shortcut string
/// `Name=value,arg1,arg2`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawPredicateSpec")]
pub struct PredicateSpec {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl PredicateSpec {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for PredicateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        for arg in &self.args {
            write!(f, ",{}", arg)?;
        }
        Ok(())
    }
}

/// Shortcut string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid predicate shortcut {0:?}: missing predicate name")]
pub struct InvalidSpec(String);

impl FromStr for PredicateSpec {
    type Err = InvalidSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = match s.split_once('=') {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (s.trim(), None),
        };
        if name.is_empty() {
            return Err(InvalidSpec(s.to_string()));
        }

        let mut parts = rest.into_iter().flat_map(|r| r.split(',')).map(str::trim);
        let value = parts.next().unwrap_or("").to_string();
        let args = parts.map(str::to_string).collect();

        Ok(Self {
            name: name.to_string(),
            value,
            args,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPredicateSpec {
    Shortcut(String),
    Full {
        name: String,
        #[serde(default)]
        value: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl TryFrom<RawPredicateSpec> for PredicateSpec {
    type Error = InvalidSpec;

    fn try_from(raw: RawPredicateSpec) -> Result<Self, Self::Error> {
        match raw {
            RawPredicateSpec::Shortcut(s) => s.parse(),
            RawPredicateSpec::Full { name, value, args } => Ok(Self { name, value, args }),
        }
    }
}
