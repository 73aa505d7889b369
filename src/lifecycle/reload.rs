//! Applies reloaded configurations to a running matcher.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::config::schema::GatewayConfig;
use crate::routing::matcher::RouteMatcher;

/// Install every configuration received on `updates` until shutdown.
///
/// Runs until the shutdown signal fires or the update channel closes.
/// Returns the number of route tables installed.
pub async fn run_reloader(
    matcher: Arc<RouteMatcher>,
    mut updates: mpsc::UnboundedReceiver<GatewayConfig>,
    mut shutdown: broadcast::Receiver<()>,
) -> usize {
    let mut installed = 0;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else {
                    tracing::debug!("Config update channel closed");
                    break;
                };
                if config.matcher.name != matcher.name() {
                    tracing::warn!(
                        current = %matcher.name(),
                        requested = %config.matcher.name,
                        "Matcher name changes require a restart; keeping current name"
                    );
                }
                let table = matcher.install(config.routes);
                installed += 1;
                tracing::info!(routes = table.len(), "Routes reloaded");
            }
            _ = shutdown.recv() => {
                tracing::debug!("Reloader stopping");
                break;
            }
        }
    }

    installed
}
