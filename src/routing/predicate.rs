//! Predicate and predicate factory abstractions.
//!
//! # Design Decisions
//! - Predicates are synchronous and must not block (hot path)
//! - Factories are stateless with respect to requests, so a built predicate
//!   can be reused for every request matched against a route snapshot

use std::fmt;

use thiserror::Error;

use crate::routing::context::RequestContext;

/// A boolean condition over a request.
pub trait Predicate: Send + Sync + fmt::Debug {
    /// Returns true if the request satisfies this condition.
    fn test(&self, ctx: &RequestContext) -> bool;
}

/// Boxed predicate as produced by factories.
pub type BoxPredicate = Box<dyn Predicate>;

/// Reason a factory refused to build a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidArgs(pub String);

impl InvalidArgs {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Builds predicates from a route's `(value, args)` pair.
pub trait PredicateFactory: Send + Sync + fmt::Debug {
    fn apply(&self, value: &str, args: &[String]) -> Result<BoxPredicate, InvalidArgs>;
}

/// Predicate backed by a closure.
pub struct FnPredicate<F> {
    label: &'static str,
    f: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
{
    pub fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnPredicate").field(&self.label).finish()
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
{
    fn test(&self, ctx: &RequestContext) -> bool {
        (self.f)(ctx)
    }
}

/// Conjunction of predicates, evaluated in declaration order.
///
/// Stops at the first predicate that returns false.
#[derive(Debug)]
pub struct Conjunction {
    predicates: Vec<BoxPredicate>,
}

impl Conjunction {
    pub fn new(first: BoxPredicate) -> Self {
        Self {
            predicates: vec![first],
        }
    }

    /// Append `next` as the right-hand side of an AND.
    pub fn and(mut self, next: BoxPredicate) -> Self {
        self.predicates.push(next);
        self
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Predicate for Conjunction {
    fn test(&self, ctx: &RequestContext) -> bool {
        self.predicates.iter().all(|p| p.test(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(result: bool, calls: Arc<AtomicUsize>) -> BoxPredicate {
        Box::new(FnPredicate::new("counting", move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            result
        }))
    }

    #[test]
    fn test_conjunction_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let conj = Conjunction::new(counting(true, calls.clone()))
            .and(counting(false, calls.clone()))
            .and(counting(true, calls.clone()));
        let ctx = RequestContext::new(Method::GET, "/".parse().unwrap());

        assert!(!conj.test(&ctx));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(conj.len(), 3);
    }

    #[test]
    fn test_conjunction_all_true() {
        let calls = Arc::new(AtomicUsize::new(0));
        let conj = Conjunction::new(counting(true, calls.clone())).and(counting(true, calls.clone()));
        let ctx = RequestContext::new(Method::GET, "/".parse().unwrap());

        assert!(conj.test(&ctx));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
