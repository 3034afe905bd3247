//! OWM Proxy - Backend Server
//!
//! Relays OpenWeatherMap One Call requests and answers with a compact,
//! short-keyed snapshot of the current conditions.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult, FailurePolicy};

use external::WeatherClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_client: WeatherClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let weather_client = WeatherClient::with_base_url(config.upstream.base_url.clone());
        Self {
            config: Arc::new(config),
            weather_client,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
