//! Predicate factory registry.
//!
//! # Responsibilities
//! - Key factories by normalized name (`PathPredicateFactory` → `Path`)
//! - Resolve predicate names while route tables are compiled
//!
//! # Design Decisions
//! - Built once at startup, then shared read-only behind an `Arc`
//! - Re-registering a name overwrites and logs a warning instead of failing

use std::collections::HashMap;
use std::sync::Arc;

use crate::predicates::builtin_factories;
use crate::routing::error::ConfigurationError;
use crate::routing::predicate::PredicateFactory;

/// Marker stripped from registration names.
pub const FACTORY_SUFFIX: &str = "PredicateFactory";

/// Canonical registry key for a factory name.
///
/// Only a trailing marker is removed: `PredicateFactoryHeader` is kept
/// whole rather than collapsing to `Header`. A name that is nothing but the
/// marker is kept as is.
pub fn normalize_name(name: &str) -> &str {
    match name.strip_suffix(FACTORY_SUFFIX) {
        Some(short) if !short.is_empty() => short,
        _ => name,
    }
}

/// Name-keyed table of predicate factories.
#[derive(Debug, Default)]
pub struct PredicateFactoryRegistry {
    factories: HashMap<String, Arc<dyn PredicateFactory>>,
    /// Keys in first-registration order.
    order: Vec<String>,
}

impl PredicateFactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in factory.
    pub fn with_builtins() -> Self {
        Self::from_factories(builtin_factories())
    }

    /// Build a registry from a provider's factories, in iteration order.
    pub fn from_factories<I, S>(factories: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn PredicateFactory>)>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for (name, factory) in factories {
            registry.register(name.as_ref(), factory);
        }
        registry
    }

    /// Register `factory` under the normalized form of `name`.
    ///
    /// Returns the factory previously held under that key, if any.
    pub fn register(
        &mut self,
        name: &str,
        factory: Arc<dyn PredicateFactory>,
    ) -> Option<Arc<dyn PredicateFactory>> {
        let key = normalize_name(name);
        let previous = self.factories.insert(key.to_string(), factory);

        match &previous {
            Some(existing) => {
                tracing::warn!(
                    predicate = %key,
                    existing = ?existing,
                    "A PredicateFactory with this name already exists. It will be overwritten."
                );
            }
            None => self.order.push(key.to_string()),
        }
        tracing::info!(predicate = %key, "Loaded PredicateFactory");

        previous
    }

    /// Find the factory registered under an already-normalized name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<dyn PredicateFactory>, ConfigurationError> {
        self.factories
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownPredicate {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered keys in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
