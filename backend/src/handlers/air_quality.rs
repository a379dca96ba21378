//! HTTP handlers for air quality data endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{AirQualityRecord, CityAqi};
use crate::AppState;

/// Query parameters for a single-location request
#[derive(Debug, Deserialize)]
pub struct AirQualityQuery {
    pub location: String,
}

/// Current conditions, 7-day forecast and 24-hour history for one location
///
/// Upstream failures never surface here; the record's `provenance` field
/// tells the dashboard which data path produced it.
pub async fn get_air_quality(
    State(state): State<AppState>,
    Query(query): Query<AirQualityQuery>,
) -> AppResult<Json<AirQualityRecord>> {
    shared::validate_location_name(&query.location)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let record = state.air_quality.fetch_record(query.location.trim()).await;
    Ok(Json(record))
}

/// Query parameters for the map overview
#[derive(Debug, Deserialize)]
pub struct CityOverviewQuery {
    pub limit: Option<usize>,
}

/// AQI and coordinates for the default cities, for map markers
pub async fn get_city_overview(
    State(state): State<AppState>,
    Query(query): Query<CityOverviewQuery>,
) -> AppResult<Json<Vec<CityAqi>>> {
    let limit = query.limit.unwrap_or(10);
    let overview = state.air_quality.city_overview(limit).await;
    Ok(Json(overview))
}
