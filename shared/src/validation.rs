//! Validation helpers for inbound dashboard parameters
//!
//! The aggregation endpoints never fail on upstream problems, so these
//! checks on caller-supplied input are the only source of 4xx responses.

use crate::models::Pollutants;

/// Longest location string accepted from the query line
pub const MAX_LOCATION_LEN: usize = 120;

/// Validate a location name used to query the feeds
pub fn validate_location_name(location: &str) -> Result<(), &'static str> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err("Location must not be empty");
    }
    if trimmed.len() > MAX_LOCATION_LEN {
        return Err("Location is too long");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("Location must not contain control characters");
    }
    Ok(())
}

/// Validate a search keyword; empty keywords are allowed and mean
/// "return the default city list"
pub fn validate_search_keyword(keyword: &str) -> Result<(), &'static str> {
    if keyword.len() > MAX_LOCATION_LEN {
        return Err("Search keyword is too long");
    }
    if keyword.chars().any(char::is_control) {
        return Err("Search keyword must not contain control characters");
    }
    Ok(())
}

/// Validate a single pollutant concentration
pub fn validate_concentration(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Concentration must be a finite number");
    }
    if value < 0.0 {
        return Err("Concentration cannot be negative");
    }
    Ok(())
}

/// Validate a full pollutant record
pub fn validate_pollutants(pollutants: &Pollutants) -> Result<(), &'static str> {
    for value in [
        pollutants.pm25,
        pollutants.pm10,
        pollutants.o3,
        pollutants.no2,
        pollutants.so2,
        pollutants.co,
    ] {
        validate_concentration(value)?;
    }
    Ok(())
}

/// Whether a value is on the canonical US EPA AQI scale
pub fn is_valid_aqi(aqi: i32) -> bool {
    (1..=500).contains(&aqi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_name_rules() {
        assert!(validate_location_name("Delhi").is_ok());
        assert!(validate_location_name("  Navi Mumbai ").is_ok());
        assert!(validate_location_name("").is_err());
        assert!(validate_location_name("   ").is_err());
        assert!(validate_location_name("Del\u{7}hi").is_err());
        assert!(validate_location_name(&"x".repeat(MAX_LOCATION_LEN + 1)).is_err());
    }

    #[test]
    fn test_search_keyword_allows_empty() {
        assert!(validate_search_keyword("").is_ok());
        assert!(validate_search_keyword("pune").is_ok());
        assert!(validate_search_keyword("pu\nne").is_err());
    }

    #[test]
    fn test_concentration_rules() {
        assert!(validate_concentration(0.0).is_ok());
        assert!(validate_concentration(182.5).is_ok());
        assert!(validate_concentration(-0.1).is_err());
        assert!(validate_concentration(f64::NAN).is_err());
        assert!(validate_concentration(f64::INFINITY).is_err());
    }

    #[test]
    fn test_pollutants_checked_fieldwise() {
        let mut pollutants = Pollutants {
            pm25: 120.0,
            pm10: 180.0,
            o3: 40.0,
            no2: 30.0,
            so2: 12.0,
            co: 1.4,
        };
        assert!(validate_pollutants(&pollutants).is_ok());
        pollutants.so2 = -3.0;
        assert!(validate_pollutants(&pollutants).is_err());
    }

    #[test]
    fn test_aqi_scale_bounds() {
        assert!(is_valid_aqi(1));
        assert!(is_valid_aqi(500));
        assert!(!is_valid_aqi(0));
        assert!(!is_valid_aqi(501));
    }
}
