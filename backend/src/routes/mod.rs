//! Route definitions for the OWM proxy

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Compact current conditions
        .route("/owm", get(handlers::get_owm))
}
