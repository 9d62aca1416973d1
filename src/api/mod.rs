//! HTTP surface of the charging station.
//!
//! Routes keep the legacy wire names:
//! - `GET /`, `GET /info`, `GET /charge` for state
//! - `POST /charge`, `POST /override`, `POST /discharge` for commands
//! - `GET /priceperhour`, `GET /baseload` for the static tables
//! - `GET /log` for recent station events

mod error;
mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

use crate::sim::SharedStation;

/// Application state shared across all request handlers.
pub struct AppState {
    /// Station handle; every handler takes its lock at most once.
    pub station: SharedStation,
}

/// Builds the axum router with all API routes.
///
/// CORS is permissive because the dashboard is served from another origin.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::get_energy))
        .route("/info", get(handlers::get_info))
        .route(
            "/charge",
            get(handlers::get_charge).post(handlers::post_charge),
        )
        .route(
            "/discharge",
            get(handlers::get_discharge).post(handlers::post_discharge),
        )
        .route(
            "/override",
            get(handlers::get_override).post(handlers::post_override),
        )
        .route("/priceperhour", get(handlers::get_prices))
        .route("/baseload", get(handlers::get_baseload))
        .route("/log", get(handlers::get_log))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the given address and serves the API until `token` is cancelled.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    token: CancellationToken,
) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await
}
