//! Air quality data models
//!
//! Every numeric field is always present: sources that omit a reading get a
//! zero or an estimated value before a record is built, so consumers never
//! have to handle missing numbers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Coordinates;

/// Concentrations of the six tracked pollutants
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Pollutants {
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
}

/// A point-in-time air quality observation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualitySample {
    pub date_time: DateTime<Utc>,
    pub aqi: i32,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub wind_speed: f64,
    pub pollutants: Pollutants,
}

/// Forecast temperature range for a day, degrees Celsius
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// One day in the 7-day forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub date_time: DateTime<Utc>,
    pub aqi: i32,
    pub temperature: TemperatureRange,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pollutants: Pollutants,
}

/// One hourly point in the 24-hour history, most recent first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date_time: DateTime<Utc>,
    pub aqi: i32,
    pub pollutants: Pollutants,
}

/// Which path produced a record
///
/// The gateway never surfaces upstream failures; this tag is what keeps the
/// fallback chain observable to callers and tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataProvenance {
    /// Both upstream feeds answered
    Live,
    /// Air quality feed answered; environmental readings were estimated
    PartiallyLive,
    /// Air quality feed failed; the record is generated
    Synthetic,
}

/// The unit returned to the dashboard for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityRecord {
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub current: AirQualitySample,
    /// Exactly 7 entries on consecutive calendar days starting today
    pub forecast: Vec<ForecastEntry>,
    /// Exactly 24 hourly entries, entry 0 = now
    pub history: Vec<HistoryEntry>,
    pub provenance: DataProvenance,
}

/// AQI for one city, consumed by the map overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAqi {
    pub name: String,
    pub aqi: i32,
    pub lat: f64,
    pub lng: f64,
}

/// Round an AQI value and clamp it to the US EPA 1..=500 convention
pub fn clamp_aqi(value: f64) -> i32 {
    (value.round() as i32).clamp(1, 500)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_aqi_bounds() {
        assert_eq!(clamp_aqi(-12.0), 1);
        assert_eq!(clamp_aqi(0.0), 1);
        assert_eq!(clamp_aqi(0.6), 1);
        assert_eq!(clamp_aqi(249.5), 250);
        assert_eq!(clamp_aqi(500.0), 500);
        assert_eq!(clamp_aqi(731.0), 500);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let sample = AirQualitySample {
            date_time: Utc::now(),
            aqi: 42,
            temperature: 24.0,
            humidity: 55.0,
            wind_speed: 8.0,
            pollutants: Pollutants::default(),
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert!(json.get("dateTime").is_some());
        assert!(json.get("windSpeed").is_some());
        assert_eq!(json["aqi"], 42);
    }
}
