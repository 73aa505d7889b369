//! HTTP inspection adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum, connect info for RemoteAddr)
//!     → RequestContext::from_request
//!     → RouteMatcher::match_request
//!     → JSON resolution or error status
//! ```

pub mod server;

pub use server::{build_router, serve};
