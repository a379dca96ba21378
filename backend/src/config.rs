//! Configuration management for the Air Quality Dashboard backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AQD_ prefix
//!
//! Feed credentials have no defaults: the WAQI token and weather API key
//! must come from a config file or the environment, never from code.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Air quality feed (WAQI) configuration
    pub waqi: WaqiConfig,

    /// Weather feed (OpenWeatherMap) configuration
    pub weather: WeatherConfig,

    /// Per-location result cache configuration
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WaqiConfig {
    /// Feed base URL
    pub base_url: String,

    /// Access token, e.g. AQD_WAQI__TOKEN
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Feed base URL
    pub base_url: String,

    /// API key, e.g. AQD_WEATHER__API_KEY
    pub api_key: String,

    /// ISO country code appended to city queries
    pub country_code: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a fetched record stays fresh, in seconds
    pub ttl_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AQD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("waqi.base_url", "https://api.waqi.info")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.country_code", "in")?
            .set_default("cache.ttl_seconds", 300)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AQD_ prefix)
            .add_source(
                Environment::with_prefix("AQD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
