//! evmatch server
//!
//! Correlates event reports from independent clients that describe the same
//! real-world occurrence, by reported time and location.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use evmatch_core::Matcher;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// evmatch - group event reports that describe the same occurrence
#[derive(Parser, Debug)]
#[command(name = "evmatch-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (defaults apply when omitted)
    #[arg(short, long, env = "EVMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address (e.g., 0.0.0.0:8888)
    #[arg(short, long, env = "EVMATCH_LISTEN")]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting evmatch-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let loaded_config = ConfigLoader::new(args.config.as_ref(), args.listen)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    match &args.config {
        Some(path) => tracing::info!("Configuration loaded from {:?}", path),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    let matcher_config = &loaded_config.matcher;
    tracing::info!(
        max_request_skew_ms = matcher_config.max_request_skew.as_millis() as u64,
        max_clock_skew_ms = matcher_config.max_clock_skew.as_millis() as u64,
        max_queue_size = matcher_config.max_queue_size,
        max_distance_m = matcher_config.max_distance,
        interval_ms = matcher_config.interval.as_millis() as u64,
        "Matcher configured"
    );

    // The scheduler stays dormant until the first report arrives.
    let matcher = Matcher::new(loaded_config.matcher)?;
    let state = AppState::new(matcher.clone());

    // Build the router
    let router = build_router(state, loaded_config.server.max_body_bytes);

    // Run the server
    let listen_addr = loaded_config.server.listen;
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // In-flight requests have drained, stop ticking.
    matcher.stop();
    tracing::info!(
        abandoned = matcher.queue_len(),
        "Server shutdown complete"
    );

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
