//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, and all
//! endpoint handlers. The dashboard is served from arbitrary origins, so
//! CORS is fully permissive — the same posture as the original deployment.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/pm25-data", get(handlers::pm25_data))
        .route("/hotspots", get(handlers::hotspots))
        .route("/alerts", get(handlers::alerts))
        .route("/alerts/export", get(handlers::alerts_export))
        .route("/assist", post(handlers::assist))
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64KB: assist messages only
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Binds to 127.0.0.1 (localhost only) on the port from config.
pub async fn start_server(state: AppState) -> Result<(), aerogrid_core::error::AerogridError> {
    let port = state.config.server.port;
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| aerogrid_core::error::AerogridError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| aerogrid_core::error::AerogridError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
