//! gateway-router
//!
//! Loads route definitions from a TOML file and resolves requests against them.
//!
//! ```text
//! gateway-router --config gateway.toml check
//! gateway-router --config gateway.toml match /api/users -X POST -H "X-Tenant: acme"
//! gateway-router --config gateway.toml serve --watch
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{Method, Uri};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use gateway_router::config::loader::read_config;
use gateway_router::config::validation::validate_config;
use gateway_router::config::watcher::ConfigWatcher;
use gateway_router::config::{ConfigError, GatewayConfig};
use gateway_router::http;
use gateway_router::lifecycle::{run_reloader, shutdown_on_signal, Shutdown};
use gateway_router::observability::logging;
use gateway_router::routing::{PredicateFactoryRegistry, RequestContext, RouteMatcher};

#[derive(Parser)]
#[command(name = "gateway-router")]
#[command(about = "Resolve requests to routes using predicate definitions", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and list routes
    Check,
    /// Resolve a single request
    Match {
        /// Request path, optionally with a query string
        uri: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        #[arg(long)]
        remote_addr: Option<SocketAddr>,
    },
    /// Serve the inspection endpoint
    Serve {
        /// Overrides server.bind_address
        #[arg(long)]
        bind: Option<String>,

        /// Reload routes when the config file changes
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = read_config(&cli.config)?;
    logging::init(&config.observability);

    tracing::info!(config = ?cli.config, routes = config.routes.len(), "gateway-router starting");

    let registry = Arc::new(PredicateFactoryRegistry::with_builtins());
    validate_config(&config, &registry).map_err(ConfigError::Invalid)?;

    let matcher = Arc::new(RouteMatcher::new(registry.clone()).with_name(config.matcher.name.clone()));
    matcher.install(config.routes.clone());

    match cli.command {
        Commands::Check => {
            for route in matcher.snapshot().definitions() {
                let predicates: Vec<String> = route.predicates.iter().map(ToString::to_string).collect();
                println!("{}\t{}", route.id, predicates.join(" && "));
            }
            println!("{} routes OK", config.routes.len());
        }
        Commands::Match {
            uri,
            method,
            headers,
            remote_addr,
        } => {
            let mut ctx = build_context(&uri, &method, &headers, remote_addr)?;
            match matcher.match_request(&mut ctx)? {
                Some(_) => println!("{}", serde_json::to_string_pretty(&ctx.route_match())?),
                None => println!("no route matched"),
            }
        }
        Commands::Serve { bind, watch } => {
            serve(&cli.config, config, bind, watch, matcher, registry).await?;
        }
    }

    Ok(())
}

fn build_context(
    uri: &str,
    method: &str,
    headers: &[String],
    remote_addr: Option<SocketAddr>,
) -> Result<RequestContext, Box<dyn std::error::Error>> {
    let uri: Uri = uri.parse()?;
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;

    let mut ctx = RequestContext::new(method, uri);
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("header {:?} is not \"Name: value\"", header))?;
        ctx = ctx.with_header(name.trim(), value.trim())?;
    }
    if let Some(addr) = remote_addr {
        ctx = ctx.with_remote_addr(addr);
    }
    Ok(ctx)
}

async fn serve(
    path: &std::path::Path,
    config: GatewayConfig,
    bind: Option<String>,
    watch: bool,
    matcher: Arc<RouteMatcher>,
    registry: Arc<PredicateFactoryRegistry>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    // Keep the watcher alive for the lifetime of the server.
    let _watcher = if watch {
        let (watcher, updates) = ConfigWatcher::new(path, registry);
        tokio::spawn(run_reloader(matcher.clone(), updates, shutdown.subscribe()));
        Some(watcher.run()?)
    } else {
        None
    };

    let bind_address = bind.unwrap_or(config.server.bind_address);
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    http::serve(listener, matcher, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
