//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap API for the environmental readings
//! (temperature, humidity, wind) and coordinates of a named city. The API
//! signals success with a numeric `cod` of 200; error payloads carry it as
//! a string, so the field is coerced before the check.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::Coordinates;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    country_code: String,
}

/// Current weather conditions for a city
#[derive(Debug, Clone, Copy)]
pub struct CurrentConditions {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub wind_speed: f64,
    pub coordinates: Coordinates,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    /// 200 as a number on success, a string code on errors
    cod: serde_json::Value,
    coord: Option<OwmCoord>,
    main: Option<OwmMain>,
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(base_url: String, api_key: String, country_code: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            country_code,
        }
    }

    /// Fetch current conditions for a city by name
    pub async fn current(&self, city: &str) -> AppResult<CurrentConditions> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", format!("{},{}", city, self.country_code)),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherFeed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherFeed(format!("{} - {}", status, body)));
        }

        let data: OwmCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherFeed(format!("failed to parse response: {}", e)))?;

        Self::convert_current_response(data)
    }

    /// Convert the raw response to our format
    fn convert_current_response(data: OwmCurrentResponse) -> AppResult<CurrentConditions> {
        if status_code(&data.cod) != 200 {
            return Err(AppError::WeatherFeed(format!(
                "feed status: {}",
                data.cod
            )));
        }

        let main = data
            .main
            .ok_or_else(|| AppError::WeatherFeed("response missing main block".to_string()))?;
        let coord = data
            .coord
            .ok_or_else(|| AppError::WeatherFeed("response missing coordinates".to_string()))?;

        Ok(CurrentConditions {
            temperature: main.temp,
            humidity: main.humidity,
            wind_speed: data.wind.map(|w| w.speed).unwrap_or(0.0),
            coordinates: Coordinates::new(coord.lat, coord.lon),
        })
    }
}

/// Coerce the `cod` field, which the API serializes as number or string
fn status_code(value: &serde_json::Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_success_response() {
        let data: OwmCurrentResponse = serde_json::from_value(serde_json::json!({
            "cod": 200,
            "coord": {"lat": 19.0144, "lon": 72.8479},
            "main": {"temp": 31.2, "humidity": 74.0},
            "wind": {"speed": 4.1}
        }))
        .unwrap();

        let conditions = WeatherClient::convert_current_response(data).unwrap();
        assert_eq!(conditions.temperature, 31.2);
        assert_eq!(conditions.humidity, 74.0);
        assert_eq!(conditions.wind_speed, 4.1);
        assert_eq!(conditions.coordinates.lng, 72.8479);
    }

    #[test]
    fn test_convert_error_response() {
        // Error payloads carry cod as a string
        let data: OwmCurrentResponse = serde_json::from_value(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        }))
        .unwrap();
        assert!(WeatherClient::convert_current_response(data).is_err());
    }

    #[test]
    fn test_status_code_coercion() {
        assert_eq!(status_code(&serde_json::json!(200)), 200);
        assert_eq!(status_code(&serde_json::json!("404")), 404);
        assert_eq!(status_code(&serde_json::json!(null)), 0);
    }
}
