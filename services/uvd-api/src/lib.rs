//! UV dose tile and estimate API service.
//!
//! HTTP server exposing the tile pyramid, point estimates, and the
//! model methodology document.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the application router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_handler))
        .route("/api/methodology", get(handlers::methodology_handler))
        .route("/api/estimate", get(handlers::estimate_handler))
        .route("/api/tiles/:dataset/:z/:x/:y", get(handlers::tile_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
