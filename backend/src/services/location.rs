//! Location search with a static fallback list of Indian cities
//!
//! Wraps the feed's station search and filters it to India. Any failure
//! or empty result degrades to the static city list, so search never
//! errors and never comes back empty.

use crate::config::Config;
use crate::external::waqi::StationCandidate;
use crate::external::WaqiClient;
use crate::models::LocationCandidate;

/// The default city list shown before any search happens
const DEFAULT_CITIES: &[&str] = &[
    "Delhi",
    "Mumbai",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Thane",
    "Bhopal",
];

/// Location search service
#[derive(Clone)]
pub struct LocationService {
    waqi: WaqiClient,
}

impl LocationService {
    /// Create a new LocationService from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            waqi: WaqiClient::new(config.waqi.base_url.clone(), config.waqi.token.clone()),
        }
    }

    /// Resolve a free-text query to candidate Indian cities
    pub async fn search(&self, query: &str) -> Vec<LocationCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return default_cities();
        }

        match self.waqi.search_stations(query).await {
            Ok(stations) => {
                let candidates: Vec<LocationCandidate> = stations
                    .into_iter()
                    .filter(is_indian_station)
                    .map(to_candidate)
                    .collect();
                if candidates.is_empty() {
                    default_cities()
                } else {
                    candidates
                }
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "location search unavailable, using default cities");
                default_cities()
            }
        }
    }
}

/// The static list of 15 major Indian cities
pub fn default_cities() -> Vec<LocationCandidate> {
    DEFAULT_CITIES
        .iter()
        .enumerate()
        .map(|(i, name)| LocationCandidate::indian((i + 1).to_string(), *name))
        .collect()
}

fn is_indian_station(station: &StationCandidate) -> bool {
    station.country.as_deref() == Some("IN")
        || station.name.contains("India")
        || station.name.contains("Indian")
}

/// Truncate the station name at the first comma; stations are usually
/// reported as "City, State, Country"
fn to_candidate(station: StationCandidate) -> LocationCandidate {
    let name = station
        .name
        .split(',')
        .next()
        .unwrap_or(station.name.as_str())
        .trim()
        .to_string();
    LocationCandidate::indian(station.uid.to_string(), name)
}
