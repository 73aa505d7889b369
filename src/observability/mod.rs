//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry / matcher / reloader
//!     → tracing events (route_id, predicate, matcher fields)
//!     → logging.rs subscriber (fmt or JSON)
//! ```
//!
//! # Design Decisions
//! - Matching logs at debug/trace only; the hot path stays quiet at info
//! - Configuration problems log at warn/error

pub mod logging;
