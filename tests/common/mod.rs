//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::Method;
use gateway_router::routing::{
    BoxPredicate, FnPredicate, InvalidArgs, PredicateFactory, RequestContext, RouteDefinition,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Route from shortcut predicate strings.
pub fn route(id: &str, specs: &[&str]) -> RouteDefinition {
    RouteDefinition::new(id, specs.iter().map(|s| s.parse().unwrap()).collect())
}

pub fn get(uri: &str) -> RequestContext {
    RequestContext::new(Method::GET, uri.parse().unwrap())
}

/// Factory whose predicates hold when their value is "true", counting every
/// evaluation.
#[derive(Debug, Default, Clone)]
pub struct CountingFactory {
    pub evaluations: Arc<AtomicUsize>,
}

impl CountingFactory {
    pub fn count(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl PredicateFactory for CountingFactory {
    fn apply(&self, value: &str, _args: &[String]) -> Result<BoxPredicate, InvalidArgs> {
        let result = match value {
            "true" => true,
            "false" => false,
            other => return Err(InvalidArgs::new(format!("expected true/false, got {:?}", other))),
        };
        let evaluations = self.evaluations.clone();
        Ok(Box::new(FnPredicate::new("counting", move |_| {
            evaluations.fetch_add(1, Ordering::SeqCst);
            result
        })))
    }
}

/// Send a bare HTTP/1.1 GET and return (status, body).
pub async fn http_get(addr: SocketAddr, path: &str) -> (u16, String) {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8_lossy(&raw).to_string();

    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let body = text.split_once("\r\n\r\n").map(|(_, b)| b.to_string()).unwrap_or_default();
    (status, body)
}
