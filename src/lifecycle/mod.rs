//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Reload (reload.rs):
//!     ConfigWatcher → validated GatewayConfig → RouteMatcher::install
//!
//! Shutdown (shutdown.rs):
//!     Signal received → reloader stops → server drains → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Reloads never block in-flight matches (snapshot swap)
//! - A rejected reload leaves the previous routes active

pub mod reload;
pub mod shutdown;
pub mod signals;

pub use reload::run_reloader;
pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
