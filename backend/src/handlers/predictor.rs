//! HTTP handler for the pollutant-to-AQI calculator

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{AqiCategory, HealthRecommendations, Pollutants};
use crate::services::predictor::{HeuristicPredictor, Predictor};

/// How many days the calculator projects pollutant levels forward
const PROJECTION_DAYS: u32 = 3;

/// Calculator input: pollutant concentrations plus environment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub pollutants: Pollutants,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Projected pollutant levels for one day out
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantProjection {
    pub days_ahead: u32,
    pub pollutants: Pollutants,
}

/// Calculator output: the estimate with its band, advice and outlook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub aqi: i32,
    pub category: AqiCategory,
    pub recommendations: HealthRecommendations,
    pub projection: Vec<PollutantProjection>,
}

/// Estimate an AQI from pollutant concentrations
pub async fn predict_aqi(Json(input): Json<PredictRequest>) -> AppResult<Json<PredictResponse>> {
    shared::validate_pollutants(&input.pollutants)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    for value in [input.temperature, input.humidity, input.wind_speed] {
        if !value.is_finite() {
            return Err(AppError::ValidationError(
                "Environmental readings must be finite numbers".to_string(),
            ));
        }
    }

    let predictor = HeuristicPredictor::new();
    let aqi = predictor.estimate_aqi(
        &input.pollutants,
        input.temperature,
        input.humidity,
        input.wind_speed,
    );

    let projection = (1..=PROJECTION_DAYS)
        .map(|days_ahead| PollutantProjection {
            days_ahead,
            pollutants: predictor.project_pollutants(
                &input.pollutants,
                days_ahead,
                input.temperature,
                input.humidity,
                input.wind_speed,
            ),
        })
        .collect();

    Ok(Json(PredictResponse {
        aqi,
        category: AqiCategory::for_aqi(aqi),
        recommendations: HealthRecommendations::for_aqi(aqi),
        projection,
    }))
}
