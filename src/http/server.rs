//! HTTP inspection server.
//!
//! # Responsibilities
//! - Resolve every incoming request against the active route table
//! - Report the resolution (no forwarding happens here)
//! - Map engine outcomes to status codes
//!
//! | Outcome | Status |
//! |---------|--------|
//! | matched route | 200 + `{"route_id", "matcher"}` |
//! | no route | 404 |
//! | validation rejected | 403 |
//! | configuration error | 500 |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::routing::{RequestContext, RouteError, RouteMatch, RouteMatcher};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_id: Option<String>,
}

/// Build the axum router answering every path and method.
pub fn build_router(matcher: Arc<RouteMatcher>) -> Router {
    Router::new()
        .fallback(resolve_handler)
        .with_state(matcher)
        .layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    matcher: Arc<RouteMatcher>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, matcher = %matcher.name(), "Inspection server starting");

    let app = build_router(matcher).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!("Inspection server stopped");
    Ok(())
}

async fn resolve_handler(State(matcher): State<Arc<RouteMatcher>>, request: Request<Body>) -> Response {
    let mut ctx = RequestContext::from_request(&request);

    match matcher.match_request(&mut ctx) {
        Ok(Some(_)) => match ctx.route_match() {
            Some(route_match) => Json::<RouteMatch>(route_match.clone()).into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        },
        Ok(None) => {
            tracing::debug!(request = %ctx.describe(), "No route matched");
            error_response(StatusCode::NOT_FOUND, "No matching route found".to_string(), None)
        }
        Err(e) => {
            let status = match e {
                RouteError::Validation(_) => StatusCode::FORBIDDEN,
                RouteError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::warn!(request = %ctx.describe(), error = %e, "Route resolution failed");
            error_response(status, e.to_string(), Some(e.route_id().to_string()))
        }
    }
}

fn error_response(status: StatusCode, error: String, route_id: Option<String>) -> Response {
    (status, Json(ErrorBody { error, route_id })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{PredicateFactoryRegistry, RouteDefinition, RouteValidator, ValidationError};
    use tower::ServiceExt;

    fn route(id: &str, specs: &[&str]) -> RouteDefinition {
        RouteDefinition::new(id, specs.iter().map(|s| s.parse().unwrap()).collect())
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn matcher() -> Arc<RouteMatcher> {
        Arc::new(RouteMatcher::new(Arc::new(PredicateFactoryRegistry::with_builtins())))
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let matcher = matcher();
        matcher.install(vec![route("api", &["Path=/api/**"]), route("broken", &["Missing"])]);
        let app = build_router(matcher);

        let (status, body) = call(app.clone(), "/api/users").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route_id"], "api");
        assert_eq!(body["matcher"], "RouteMatcher");

        let (status, body) = call(app, "/other").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["route_id"], "broken");
    }

    #[tokio::test]
    async fn test_not_found() {
        let matcher = matcher();
        matcher.install(vec![route("api", &["Path=/api/**"])]);

        let (status, body) = call(build_router(matcher), "/web").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("route_id").is_none());
    }

    struct DenyAll;

    impl RouteValidator for DenyAll {
        fn validate(&self, route: &RouteDefinition, _ctx: &RequestContext) -> Result<(), ValidationError> {
            Err(ValidationError::new(&route.id, "denied"))
        }
    }

    #[tokio::test]
    async fn test_validation_is_forbidden() {
        let registry = Arc::new(PredicateFactoryRegistry::with_builtins());
        let matcher = Arc::new(RouteMatcher::new(registry).with_validator(Arc::new(DenyAll)));
        matcher.install(vec![route("api", &["Path=/**"])]);

        let (status, body) = call(build_router(matcher), "/x").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["route_id"], "api");
    }
}
