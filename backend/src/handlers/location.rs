//! HTTP handlers for location search

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::LocationCandidate;
use crate::AppState;

/// Query parameters for location search
#[derive(Debug, Deserialize)]
pub struct LocationSearchQuery {
    /// Free-text keyword; empty or missing returns the default city list
    pub q: Option<String>,
}

/// Resolve a free-text query to candidate Indian cities
pub async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationSearchQuery>,
) -> AppResult<Json<Vec<LocationCandidate>>> {
    let keyword = query.q.unwrap_or_default();
    shared::validate_search_keyword(&keyword)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let candidates = state.locations.search(&keyword).await;
    Ok(Json(candidates))
}
