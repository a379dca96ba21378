//! Route definitions for the Air Quality Dashboard backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Air quality data
        .nest("/air-quality", air_quality_routes())
        // Location search
        .nest("/locations", location_routes())
        // Pollutant-to-AQI calculator
        .route("/predict", post(handlers::predict_aqi))
}

/// Air quality data routes
fn air_quality_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_air_quality))
        .route("/cities", get(handlers::get_city_overview))
}

/// Location search routes
fn location_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::search_locations))
}
