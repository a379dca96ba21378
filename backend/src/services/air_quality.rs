//! Aggregation gateway over the air quality and weather feeds
//!
//! Merges the two upstream feeds into one record per location. Every
//! failure path ends in generated data, so the caller always receives a
//! complete record; the `provenance` tag is the only trace of which path
//! produced it. Results are cached per location for a short window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::{thread_rng, Rng};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::external::waqi::CityFeed;
use crate::external::weather::CurrentConditions;
use crate::external::{WaqiClient, WeatherClient};
use crate::models::{
    AirQualityRecord, AirQualitySample, CityAqi, DataProvenance, INDIA_CENTROID,
};
use crate::services::forecast::ForecastSynthesizer;
use crate::services::location::default_cities;
use crate::services::mock::MockDataGenerator;
use crate::services::predictor::{HeuristicPredictor, Predictor};

/// Most cities the map overview will fetch in one batch
pub const MAX_OVERVIEW_CITIES: usize = 10;

/// Air quality aggregation service
#[derive(Clone)]
pub struct AirQualityService {
    waqi: WaqiClient,
    weather: WeatherClient,
    predictor: HeuristicPredictor,
    synthesizer: ForecastSynthesizer,
    mock: MockDataGenerator,
    cache: Arc<RwLock<HashMap<String, CachedRecord>>>,
    cache_ttl: Duration,
}

struct CachedRecord {
    stored_at: Instant,
    record: AirQualityRecord,
}

impl AirQualityService {
    /// Create a new AirQualityService from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            waqi: WaqiClient::new(config.waqi.base_url.clone(), config.waqi.token.clone()),
            weather: WeatherClient::new(
                config.weather.base_url.clone(),
                config.weather.api_key.clone(),
                config.weather.country_code.clone(),
            ),
            predictor: HeuristicPredictor::new(),
            synthesizer: ForecastSynthesizer::new(),
            mock: MockDataGenerator::new(),
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: Duration::from_secs(config.cache.ttl_seconds),
        }
    }

    /// Fetch the full record for a location
    ///
    /// Infallible by contract: transport errors, bad feed statuses and
    /// malformed payloads are logged and absorbed by the fallback chain.
    pub async fn fetch_record(&self, location: &str) -> AirQualityRecord {
        let key = cache_key(location);
        if let Some(record) = self.cached(&key).await {
            tracing::debug!(location, "serving cached record");
            return record;
        }

        let (feed, weather) = tokio::join!(
            self.waqi.city_feed(location),
            self.weather.current(location),
        );

        let weather = match weather {
            Ok(conditions) => Some(conditions),
            Err(err) => {
                tracing::warn!(location, error = %err, "weather feed unavailable");
                None
            }
        };

        let record = match feed {
            Ok(feed) => self.assemble(location, feed, weather),
            Err(err) => {
                tracing::warn!(location, error = %err, "air quality feed unavailable, generating record");
                self.mock.generate_record(location, weather.as_ref())
            }
        };

        self.store(key, record.clone()).await;
        record
    }

    /// Fetch name, AQI and coordinates for the default cities, for the map
    ///
    /// All cities are fetched concurrently; `fetch_record` absorbs every
    /// failure, so a slow or dead feed degrades individual entries to
    /// synthetic data instead of aborting the batch.
    pub async fn city_overview(&self, limit: usize) -> Vec<CityAqi> {
        let cities = default_cities();
        let limit = limit.clamp(1, MAX_OVERVIEW_CITIES);

        let fetches = cities.iter().take(limit).map(|city| async move {
            let record = self.fetch_record(&city.name).await;
            let coordinates = record.coordinates.unwrap_or(INDIA_CENTROID);
            CityAqi {
                name: city.name.clone(),
                aqi: record.current.aqi,
                lat: coordinates.lat,
                lng: coordinates.lng,
            }
        });

        futures::future::join_all(fetches).await
    }

    /// Merge a live feed payload with whatever weather data arrived
    fn assemble(
        &self,
        location: &str,
        feed: CityFeed,
        weather: Option<CurrentConditions>,
    ) -> AirQualityRecord {
        let mut rng = thread_rng();

        // Weather feed values win; station channels are the backup and a
        // plausible random estimate keeps the record complete
        let temperature = weather
            .map(|w| w.temperature)
            .or(feed.environment.temperature)
            .unwrap_or_else(|| rng.gen_range(15.0..35.0));
        let humidity = weather
            .map(|w| w.humidity)
            .or(feed.environment.humidity)
            .unwrap_or_else(|| rng.gen_range(40.0..80.0));
        let wind_speed = weather
            .map(|w| w.wind_speed)
            .or(feed.environment.wind_speed)
            .unwrap_or_else(|| rng.gen_range(1.0..16.0));
        let coordinates = weather.map(|w| w.coordinates).or(feed.coordinates);

        let estimate =
            self.predictor
                .estimate_aqi(&feed.pollutants, temperature, humidity, wind_speed);
        tracing::debug!(
            location,
            feed_aqi = feed.aqi,
            heuristic_aqi = estimate,
            "heuristic cross-check"
        );

        let forecast = self.synthesizer.synthesize_forecast(
            feed.aqi,
            &feed.pollutants,
            temperature,
            humidity,
            wind_speed,
        );
        let history = if feed.daily_pm25.is_empty() {
            self.synthesizer.synthesize_history(feed.aqi)
        } else {
            self.synthesizer.history_from_daily_series(&feed.daily_pm25)
        };

        let provenance = if weather.is_some() {
            DataProvenance::Live
        } else {
            DataProvenance::PartiallyLive
        };

        AirQualityRecord {
            location: feed
                .station_name
                .unwrap_or_else(|| location.to_string()),
            coordinates,
            current: AirQualitySample {
                date_time: Utc::now(),
                aqi: feed.aqi,
                temperature,
                humidity,
                wind_speed,
                pollutants: feed.pollutants,
            },
            forecast,
            history,
            provenance,
        }
    }

    async fn cached(&self, key: &str) -> Option<AirQualityRecord> {
        let cache = self.cache.read().await;
        cache
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.record.clone())
    }

    async fn store(&self, key: String, record: AirQualityRecord) {
        let mut cache = self.cache.write().await;
        // Expired entries for other locations are dropped on the way in,
        // so the map never outgrows the set of recently queried cities
        cache.retain(|_, entry| entry.stored_at.elapsed() < self.cache_ttl);
        cache.insert(
            key,
            CachedRecord {
                stored_at: Instant::now(),
                record,
            },
        );
    }
}

/// Case-folded cache key for a location
fn cache_key(location: &str) -> String {
    location.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, ServerConfig, WaqiConfig, WeatherConfig};
    use crate::services::forecast::{FORECAST_DAYS, HISTORY_HOURS};

    /// Config pointing both feeds at an unroutable endpoint
    fn offline_config() -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            waqi: WaqiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                token: "test-token".to_string(),
            },
            weather: WeatherConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: "test-key".to_string(),
                country_code: "in".to_string(),
            },
            cache: CacheConfig { ttl_seconds: 300 },
        }
    }

    #[tokio::test]
    async fn test_dead_feeds_still_yield_full_record() {
        let service = AirQualityService::new(&offline_config());
        let record = service.fetch_record("Delhi").await;

        assert_eq!(record.provenance, DataProvenance::Synthetic);
        assert_eq!(record.forecast.len(), FORECAST_DAYS);
        assert_eq!(record.history.len(), HISTORY_HOURS);
        // Coordinates resolve through the static table when no feed answers
        assert_eq!(record.coordinates.unwrap().lat, 28.7041);
    }

    #[tokio::test]
    async fn test_unknown_city_falls_back_to_centroid() {
        let service = AirQualityService::new(&offline_config());
        let record = service.fetch_record("Shangri-La").await;
        assert_eq!(record.coordinates.unwrap(), INDIA_CENTROID);
    }

    #[tokio::test]
    async fn test_repeat_queries_hit_the_cache() {
        let service = AirQualityService::new(&offline_config());
        let first = service.fetch_record("Pune").await;
        let second = service.fetch_record("pune ").await;

        // Synthetic records vary per generation; identical AQI and
        // timestamps mean the second call was served from the cache
        assert_eq!(first.current.aqi, second.current.aqi);
        assert_eq!(first.current.date_time, second.current.date_time);
        assert_eq!(first.history.len(), second.history.len());
    }

    #[tokio::test]
    async fn test_city_overview_covers_requested_cities() {
        let service = AirQualityService::new(&offline_config());
        let overview = service.city_overview(3).await;

        assert_eq!(overview.len(), 3);
        assert_eq!(overview[0].name, "Delhi");
        for city in &overview {
            assert!((1..=500).contains(&city.aqi));
        }
    }

    #[test]
    fn test_cache_key_folds_case_and_whitespace() {
        assert_eq!(cache_key(" Delhi "), "delhi");
        assert_eq!(cache_key("MUMBAI"), "mumbai");
    }
}
