//! Request view consumed by predicates.
//!
//! # Responsibilities
//! - Expose the request attributes predicates read (method, path, host,
//!   headers, query, cookies, remote address)
//! - Carry the result slot the matcher fills for the downstream stage
//!
//! # Design Decisions
//! - Typed fields instead of an untyped attribute map
//! - Result slot is only writable from inside the crate

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, Uri};
use serde::Serialize;

/// Outcome recorded on the context after a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Id of the matched route.
    pub route_id: String,
    /// Name of the matcher that selected the route.
    pub matcher: String,
}

/// Per-request context evaluated by predicates.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    remote_addr: Option<SocketAddr>,
    route_match: Option<RouteMatch>,
}

impl RequestContext {
    /// Create a context with no headers and no remote address.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            remote_addr: None,
            route_match: None,
        }
    }

    /// Build a context from an HTTP request.
    ///
    /// The remote address is taken from axum's `ConnectInfo` extension when
    /// the server was started with connect info.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let remote_addr = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);

        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
            remote_addr,
            route_match: None,
        }
    }

    /// Append a header, parsing name and value.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, axum::http::Error> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Set the peer address.
    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    /// Host the request was addressed to, without port.
    ///
    /// Prefers the `Host` header and falls back to the URI authority.
    pub fn host(&self) -> Option<&str> {
        let raw = self
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| self.uri.authority().map(|a| a.as_str()))?;
        Some(strip_port(raw))
    }

    /// All decoded values of a query parameter.
    pub fn query_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = String> + 'a {
        let query = self.uri.query().unwrap_or("");
        url::form_urlencoded::parse(query.as_bytes())
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// All values of a cookie across every `Cookie` header.
    pub fn cookie_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|h| h.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(move |(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// The route selected for this request, if any.
    pub fn route_match(&self) -> Option<&RouteMatch> {
        self.route_match.as_ref()
    }

    pub(crate) fn set_route_match(&mut self, route_id: &str, matcher: &str) {
        self.route_match = Some(RouteMatch {
            route_id: route_id.to_string(),
            matcher: matcher.to_string(),
        });
    }

    /// Short description used in log lines.
    pub fn describe(&self) -> String {
        format!("Exchange: {} {}", self.method, self.uri)
    }
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
