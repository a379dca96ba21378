//! Business logic services for the Air Quality Dashboard

pub mod air_quality;
pub mod forecast;
pub mod location;
pub mod mock;
pub mod predictor;

pub use air_quality::AirQualityService;
pub use forecast::ForecastSynthesizer;
pub use location::LocationService;
pub use mock::MockDataGenerator;
pub use predictor::{HeuristicPredictor, Predictor};
