//! Synthetic record generation for locations with no live data
//!
//! When the air quality feed is down the dashboard still has to render
//! something, so this produces a complete, internally consistent record:
//! a plausible AQI, pollutants derived from it, coordinates from a static
//! city table, and synthesized forecast and history series.

use chrono::Utc;
use rand::{thread_rng, Rng};

use crate::external::weather::CurrentConditions;
use crate::models::{
    AirQualityRecord, AirQualitySample, Coordinates, DataProvenance, INDIA_CENTROID,
};
use crate::services::forecast::{sample_pollutants, ForecastSynthesizer};

/// Coordinates for the major Indian cities the dashboard covers
const CITY_COORDINATES: &[(&str, Coordinates)] = &[
    ("Delhi", Coordinates { lat: 28.7041, lng: 77.1025 }),
    ("Mumbai", Coordinates { lat: 19.0760, lng: 72.8777 }),
    ("Bangalore", Coordinates { lat: 12.9716, lng: 77.5946 }),
    ("Bengaluru", Coordinates { lat: 12.9716, lng: 77.5946 }),
    ("Chennai", Coordinates { lat: 13.0827, lng: 80.2707 }),
    ("Kolkata", Coordinates { lat: 22.5726, lng: 88.3639 }),
    ("Hyderabad", Coordinates { lat: 17.3850, lng: 78.4867 }),
    ("Pune", Coordinates { lat: 18.5204, lng: 73.8567 }),
    ("Ahmedabad", Coordinates { lat: 23.0225, lng: 72.5714 }),
    ("Jaipur", Coordinates { lat: 26.9124, lng: 75.7873 }),
    ("Lucknow", Coordinates { lat: 26.8467, lng: 80.9462 }),
    ("Kanpur", Coordinates { lat: 26.4499, lng: 80.3319 }),
    ("Nagpur", Coordinates { lat: 21.1458, lng: 79.0882 }),
    ("Indore", Coordinates { lat: 22.7196, lng: 75.8577 }),
    ("Thane", Coordinates { lat: 19.2183, lng: 72.9781 }),
    ("Bhopal", Coordinates { lat: 23.2599, lng: 77.4126 }),
];

/// Produces complete synthetic records
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDataGenerator {
    synthesizer: ForecastSynthesizer,
}

impl MockDataGenerator {
    pub fn new() -> Self {
        Self {
            synthesizer: ForecastSynthesizer::new(),
        }
    }

    /// Generate a full record for a location
    ///
    /// Weather readings that did arrive are kept; everything else is drawn
    /// from plausible ranges. Coordinates come from the static city table,
    /// so they are deterministic for a given location string.
    pub fn generate_record(
        &self,
        location: &str,
        weather: Option<&CurrentConditions>,
    ) -> AirQualityRecord {
        let mut rng = thread_rng();

        let aqi = rng.gen_range(1..=300);
        let temperature = weather
            .map(|w| w.temperature)
            .unwrap_or_else(|| rng.gen_range(15.0..35.0));
        let humidity = weather
            .map(|w| w.humidity)
            .unwrap_or_else(|| rng.gen_range(40.0..80.0));
        let wind_speed = weather
            .map(|w| w.wind_speed)
            .unwrap_or_else(|| rng.gen_range(1.0..16.0));
        let coordinates = weather
            .map(|w| w.coordinates)
            .unwrap_or_else(|| city_coordinates(location));

        let pollutants = sample_pollutants(aqi, &mut rng);
        let forecast =
            self.synthesizer
                .synthesize_forecast(aqi, &pollutants, temperature, humidity, wind_speed);
        let history = self.synthesizer.synthesize_history(aqi);

        AirQualityRecord {
            location: location.to_string(),
            coordinates: Some(coordinates),
            current: AirQualitySample {
                date_time: Utc::now(),
                aqi,
                temperature,
                humidity,
                wind_speed,
                pollutants,
            },
            forecast,
            history,
            provenance: DataProvenance::Synthetic,
        }
    }
}

/// Look up coordinates for a location by case-insensitive substring match,
/// defaulting to the centroid of India
pub fn city_coordinates(location: &str) -> Coordinates {
    let location = location.to_lowercase();
    CITY_COORDINATES
        .iter()
        .find(|(city, _)| location.contains(&city.to_lowercase()))
        .map(|(_, coordinates)| *coordinates)
        .unwrap_or(INDIA_CENTROID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::forecast::{FORECAST_DAYS, HISTORY_HOURS};

    #[test]
    fn test_city_lookup_matches_substring() {
        assert_eq!(city_coordinates("Delhi").lat, 28.7041);
        assert_eq!(city_coordinates("new delhi railway station").lat, 28.7041);
        assert_eq!(city_coordinates("Navi Mumbai, Maharashtra").lng, 72.8777);
        assert_eq!(city_coordinates("BENGALURU").lat, 12.9716);
    }

    #[test]
    fn test_city_lookup_defaults_to_centroid() {
        assert_eq!(city_coordinates("Atlantis"), INDIA_CENTROID);
        assert_eq!(city_coordinates(""), INDIA_CENTROID);
    }

    #[test]
    fn test_coordinates_deterministic_across_records() {
        let generator = MockDataGenerator::new();
        let first = generator.generate_record("Jaipur", None);
        let second = generator.generate_record("Jaipur", None);
        assert_eq!(first.coordinates, second.coordinates);
    }

    #[test]
    fn test_record_is_complete() {
        let generator = MockDataGenerator::new();
        let record = generator.generate_record("Chennai", None);

        assert_eq!(record.provenance, DataProvenance::Synthetic);
        assert_eq!(record.forecast.len(), FORECAST_DAYS);
        assert_eq!(record.history.len(), HISTORY_HOURS);
        assert!((1..=300).contains(&record.current.aqi));
        assert!((15.0..35.0).contains(&record.current.temperature));
        assert!((40.0..80.0).contains(&record.current.humidity));
        assert!((1.0..16.0).contains(&record.current.wind_speed));
    }

    #[test]
    fn test_partial_weather_is_kept() {
        let generator = MockDataGenerator::new();
        let conditions = CurrentConditions {
            temperature: 33.5,
            humidity: 68.0,
            wind_speed: 3.2,
            coordinates: Coordinates::new(17.3850, 78.4867),
        };
        let record = generator.generate_record("Hyderabad", Some(&conditions));

        assert_eq!(record.current.temperature, 33.5);
        assert_eq!(record.current.humidity, 68.0);
        assert_eq!(record.current.wind_speed, 3.2);
        assert_eq!(record.coordinates.unwrap().lat, 17.3850);
    }
}
