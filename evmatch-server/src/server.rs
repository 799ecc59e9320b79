//! Axum server setup and router configuration.

use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{Json, Router, extract::DefaultBodyLimit, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Build the main application router.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .merge(crate::api::router())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        // Add state to all routes
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    queued: usize,
    capacity: usize,
    scheduler_running: bool,
}

/// Simple health check - returns OK with queue occupancy.
async fn health_check(state: axum::extract::State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        queued: state.matcher.queue_len(),
        capacity: state.matcher.capacity(),
        scheduler_running: state.matcher.is_running(),
    })
}

/// Run the server with graceful shutdown support.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
