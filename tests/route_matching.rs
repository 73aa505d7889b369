//! End-to-end matching behaviour through the public API.

use std::sync::Arc;

use gateway_router::routing::{
    ConfigurationError, Predicate, PredicateCombinator, PredicateFactory, PredicateFactoryRegistry,
    PredicateSpec, RouteDefinition, RouteError, RouteMatcher,
};

mod common;
use common::{get, route, CountingFactory};

fn counting_matcher() -> (RouteMatcher, CountingFactory) {
    let factory = CountingFactory::default();
    let registry = PredicateFactoryRegistry::from_factories([(
        "CountingPredicateFactory",
        Arc::new(factory.clone()) as Arc<dyn PredicateFactory>,
    )]);
    (RouteMatcher::new(Arc::new(registry)), factory)
}

#[test]
fn test_path_priority_scenario() {
    let matcher = RouteMatcher::new(Arc::new(PredicateFactoryRegistry::with_builtins()));
    let routes = vec![
        RouteDefinition::new("r1", vec![PredicateSpec::new("Path", "/a/**")]),
        RouteDefinition::new("r2", vec![PredicateSpec::new("Path", "/**")]),
    ];
    matcher.install(routes.clone());

    let mut ctx = get("/a/x");
    assert_eq!(matcher.match_request(&mut ctx).unwrap().unwrap().id, "r1");
    assert_eq!(ctx.route_match().unwrap().route_id, "r1");

    let mut ctx = get("/b");
    assert_eq!(matcher.match_routes(&routes, &mut ctx).unwrap().unwrap().id, "r2");

    matcher.install(Vec::new());
    assert!(matcher.match_request(&mut get("/a/x")).unwrap().is_none());
}

#[test]
fn test_missing_factory_scenario() {
    let matcher = RouteMatcher::new(Arc::new(PredicateFactoryRegistry::with_builtins()));
    let routes = vec![RouteDefinition::new(
        "r",
        vec![
            PredicateSpec::new("Header", "X-Foo").with_args(["bar"]),
            PredicateSpec::new("Missing", ""),
        ],
    )];
    matcher.install(routes.clone());

    let with_header = get("/").with_header("X-Foo", "bar").unwrap();
    for mut ctx in [get("/"), with_header] {
        let expected = RouteError::Configuration {
            route_id: "r".into(),
            source: ConfigurationError::UnknownPredicate { name: "Missing".into() },
        };
        assert_eq!(matcher.match_request(&mut ctx).unwrap_err(), expected);
        assert_eq!(matcher.match_routes(&routes, &mut ctx).unwrap_err(), expected);
    }
}

#[test]
fn test_conjunction_matches_logical_and() {
    let (matcher, _) = counting_matcher();
    let registry = matcher.registry().clone();
    let combinator = PredicateCombinator::new(&registry);

    let cases: [(&[&str], bool); 5] = [
        (&["Counting=true"], true),
        (&["Counting=false"], false),
        (&["Counting=true", "Counting=true", "Counting=true"], true),
        (&["Counting=true", "Counting=false", "Counting=true"], false),
        (&["Counting=false", "Counting=true"], false),
    ];
    for (specs, expected) in cases {
        let predicate = combinator.combine(&route("r", specs)).unwrap();
        assert_eq!(predicate.test(&get("/")), expected, "specs {:?}", specs);
    }
}

#[test]
fn test_short_circuit_counts() {
    let (matcher, factory) = counting_matcher();
    matcher.install(vec![
        route("first", &["Counting=false", "Counting=true"]),
        route("empty", &[]),
        route("winner", &["Counting=true", "Counting=true"]),
        route("after", &["Counting=true"]),
    ]);

    let mut ctx = get("/");
    assert_eq!(matcher.match_request(&mut ctx).unwrap().unwrap().id, "winner");
    // first: 1 (stops at false), winner: 2, after: never
    assert_eq!(factory.count(), 3);
}

#[test]
fn test_none_only_when_nothing_holds() {
    let (matcher, _) = counting_matcher();
    matcher.install(vec![
        route("a", &["Counting=false"]),
        route("b", &[]),
        route("c", &["Counting=true", "Counting=false"]),
    ]);
    let mut ctx = get("/");
    assert!(matcher.match_request(&mut ctx).unwrap().is_none());
    assert!(ctx.route_match().is_none());
}

#[test]
fn test_invalid_arguments_abort_when_reached() {
    let (matcher, _) = counting_matcher();
    matcher.install(vec![route("ok", &["Counting=false"]), route("bad", &["Counting=maybe"])]);

    let err = matcher.match_request(&mut get("/")).unwrap_err();
    assert_eq!(err.route_id(), "bad");
    assert!(matches!(
        err,
        RouteError::Configuration {
            source: ConfigurationError::InvalidPredicate { .. },
            ..
        }
    ));
}

#[test]
fn test_provider_override_keeps_last_registration() {
    let first = CountingFactory::default();
    let second = CountingFactory::default();
    let mut registry = PredicateFactoryRegistry::new();
    assert!(registry.register("CountingPredicateFactory", Arc::new(first.clone())).is_none());
    assert!(registry.register("Counting", Arc::new(second.clone())).is_some());

    let matcher = RouteMatcher::new(Arc::new(registry));
    matcher.install(vec![route("r", &["Counting=true"])]);
    matcher.match_request(&mut get("/")).unwrap();

    assert_eq!(first.count(), 0);
    assert_eq!(second.count(), 1);
}

#[test]
fn test_mixed_builtin_predicates() {
    let matcher = RouteMatcher::new(Arc::new(PredicateFactoryRegistry::with_builtins())).with_name("edge");
    matcher.install(vec![
        route("admin", &["Path=/admin/**", "RemoteAddr=10.0.0.0/8"]),
        route("search", &["Path=/search", "Query=q", "Method=GET"]),
        route("tenant", &["Host=**.example.com", "Header=X-Tenant,[a-z]+"]),
    ]);

    let mut ctx = get("/admin/users").with_remote_addr("10.2.3.4:4000".parse().unwrap());
    assert_eq!(matcher.match_request(&mut ctx).unwrap().unwrap().id, "admin");
    assert_eq!(ctx.route_match().unwrap().matcher, "edge");

    let mut ctx = get("/admin/users").with_remote_addr("192.168.1.1:4000".parse().unwrap());
    assert!(matcher.match_request(&mut ctx).unwrap().is_none());

    let mut ctx = get("/search?q=rust");
    assert_eq!(matcher.match_request(&mut ctx).unwrap().unwrap().id, "search");

    let mut ctx = get("http://eu.example.com/anything").with_header("X-Tenant", "acme").unwrap();
    assert_eq!(matcher.match_request(&mut ctx).unwrap().unwrap().id, "tenant");

    let mut ctx = get("http://eu.example.com/anything").with_header("X-Tenant", "ACME").unwrap();
    assert!(matcher.match_request(&mut ctx).unwrap().is_none());
}
