//! Air quality feed client
//!
//! Integrates with the World Air Quality Index (WAQI) API for city-level
//! AQI readings, per-pollutant breakdowns and station search. The feed
//! wraps every payload in a `status` envelope; anything other than `"ok"`
//! with a data object is treated as a feed error.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Coordinates, Pollutants};

/// WAQI API client
#[derive(Clone)]
pub struct WaqiClient {
    client: Client,
    token: String,
    base_url: String,
}

/// Environmental channels some stations report alongside pollutants
#[derive(Debug, Clone, Copy, Default)]
pub struct StationEnvironment {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// Converted city feed payload
#[derive(Debug, Clone)]
pub struct CityFeed {
    pub station_name: Option<String>,
    pub aqi: i32,
    pub pollutants: Pollutants,
    pub environment: StationEnvironment,
    pub coordinates: Option<Coordinates>,
    /// Daily PM2.5 averages when the station publishes a forecast series
    pub daily_pm25: Vec<f64>,
}

/// A station returned by keyword search
#[derive(Debug, Clone)]
pub struct StationCandidate {
    pub uid: i64,
    pub name: String,
    pub country: Option<String>,
}

/// WAQI feed response payload
#[derive(Debug, Deserialize)]
struct WaqiData {
    /// Reported as a number normally, `"-"` when the station has no index
    aqi: Option<serde_json::Value>,
    #[serde(default)]
    iaqi: WaqiIaqi,
    city: Option<WaqiCity>,
    forecast: Option<WaqiForecast>,
}

#[derive(Debug, Default, Deserialize)]
struct WaqiIaqi {
    pm25: Option<WaqiReading>,
    pm10: Option<WaqiReading>,
    o3: Option<WaqiReading>,
    no2: Option<WaqiReading>,
    so2: Option<WaqiReading>,
    co: Option<WaqiReading>,
    /// Temperature channel
    t: Option<WaqiReading>,
    /// Humidity channel
    h: Option<WaqiReading>,
    /// Wind speed channel
    w: Option<WaqiReading>,
}

#[derive(Debug, Deserialize)]
struct WaqiReading {
    v: f64,
}

#[derive(Debug, Deserialize)]
struct WaqiCity {
    name: Option<String>,
    /// `[latitude, longitude]`
    geo: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct WaqiForecast {
    daily: Option<WaqiDaily>,
}

#[derive(Debug, Deserialize)]
struct WaqiDaily {
    pm25: Option<Vec<WaqiDailyPoint>>,
}

#[derive(Debug, Deserialize)]
struct WaqiDailyPoint {
    avg: Option<f64>,
}

/// WAQI search response payload
#[derive(Debug, Deserialize)]
struct WaqiSearchRow {
    uid: i64,
    station: WaqiStation,
}

#[derive(Debug, Deserialize)]
struct WaqiStation {
    name: String,
    country: Option<String>,
}

impl WaqiClient {
    /// Create a new WaqiClient
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url,
        }
    }

    /// Fetch the current city feed for a named location
    pub async fn city_feed(&self, location: &str) -> AppResult<CityFeed> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Configuration(format!("Invalid WAQI base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("Invalid WAQI base URL".to_string()))?
            .push("feed")
            .push(location)
            .push("");
        url.query_pairs_mut().append_pair("token", &self.token);

        let data: WaqiData = self.request(url).await?;
        Ok(Self::convert_feed(data))
    }

    /// Search stations by keyword
    pub async fn search_stations(&self, keyword: &str) -> AppResult<Vec<StationCandidate>> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Configuration(format!("Invalid WAQI base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("Invalid WAQI base URL".to_string()))?
            .push("search")
            .push("");
        url.query_pairs_mut()
            .append_pair("keyword", keyword)
            .append_pair("token", &self.token);

        let rows: Vec<WaqiSearchRow> = self.request(url).await?;
        Ok(rows
            .into_iter()
            .map(|row| StationCandidate {
                uid: row.uid,
                name: row.station.name,
                country: row.station.country,
            })
            .collect())
    }

    /// Issue a request and unwrap the WAQI status envelope
    async fn request<T: serde::de::DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::AqiFeed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AqiFeed(format!("{} - {}", status, body)));
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::AqiFeed(format!("failed to parse response: {}", e)))?;

        // On errors the feed puts a message string where the payload goes,
        // so the status field has to be checked before deserializing data
        let status = envelope
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("missing");
        if status != "ok" {
            return Err(AppError::AqiFeed(format!("feed status: {}", status)));
        }

        let data = envelope
            .get("data")
            .cloned()
            .ok_or_else(|| AppError::AqiFeed("feed returned no data".to_string()))?;

        serde_json::from_value(data)
            .map_err(|e| AppError::AqiFeed(format!("unexpected payload shape: {}", e)))
    }

    /// Convert the raw feed payload to our format
    fn convert_feed(data: WaqiData) -> CityFeed {
        let aqi = data
            .aqi
            .as_ref()
            .and_then(|v| v.as_f64())
            .map(|v| v.round() as i32)
            .unwrap_or(0)
            .max(0);

        let reading = |r: &Option<WaqiReading>| r.as_ref().map(|r| r.v.max(0.0)).unwrap_or(0.0);
        let pollutants = Pollutants {
            pm25: reading(&data.iaqi.pm25),
            pm10: reading(&data.iaqi.pm10),
            o3: reading(&data.iaqi.o3),
            no2: reading(&data.iaqi.no2),
            so2: reading(&data.iaqi.so2),
            co: reading(&data.iaqi.co),
        };

        let environment = StationEnvironment {
            temperature: data.iaqi.t.as_ref().map(|r| r.v),
            humidity: data.iaqi.h.as_ref().map(|r| r.v),
            wind_speed: data.iaqi.w.as_ref().map(|r| r.v),
        };

        let coordinates = data
            .city
            .as_ref()
            .and_then(|c| c.geo.as_ref())
            .filter(|geo| geo.len() >= 2)
            .map(|geo| Coordinates::new(geo[0], geo[1]));

        let daily_pm25 = data
            .forecast
            .and_then(|f| f.daily)
            .and_then(|d| d.pm25)
            .map(|points| points.into_iter().filter_map(|p| p.avg).collect())
            .unwrap_or_default();

        CityFeed {
            station_name: data.city.and_then(|c| c.name),
            aqi,
            pollutants,
            environment,
            coordinates,
            daily_pm25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_feed_full_payload() {
        let data: WaqiData = serde_json::from_value(serde_json::json!({
            "aqi": 168,
            "iaqi": {
                "pm25": {"v": 168.0},
                "pm10": {"v": 90.0},
                "o3": {"v": 12.4},
                "t": {"v": 29.0},
                "h": {"v": 61.0},
                "w": {"v": 2.5}
            },
            "city": {"name": "New Delhi, India", "geo": [28.6139, 77.2090]},
            "forecast": {"daily": {"pm25": [{"avg": 170.0}, {"avg": 155.0}]}}
        }))
        .unwrap();

        let feed = WaqiClient::convert_feed(data);
        assert_eq!(feed.aqi, 168);
        assert_eq!(feed.pollutants.pm25, 168.0);
        // Channels the station does not report default to zero
        assert_eq!(feed.pollutants.no2, 0.0);
        assert_eq!(feed.environment.temperature, Some(29.0));
        assert_eq!(feed.coordinates.unwrap().lat, 28.6139);
        assert_eq!(feed.daily_pm25, vec![170.0, 155.0]);
        assert_eq!(feed.station_name.as_deref(), Some("New Delhi, India"));
    }

    #[test]
    fn test_convert_feed_dash_aqi() {
        // Stations without an index report aqi as "-"
        let data: WaqiData =
            serde_json::from_value(serde_json::json!({"aqi": "-", "iaqi": {}})).unwrap();
        let feed = WaqiClient::convert_feed(data);
        assert_eq!(feed.aqi, 0);
        assert!(feed.coordinates.is_none());
        assert!(feed.daily_pm25.is_empty());
    }
}
