//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Geographic coordinates in WGS84 degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geographic centroid of India, used when a city cannot be matched
pub const INDIA_CENTROID: Coordinates = Coordinates {
    lat: 20.5937,
    lng: 78.9629,
};
