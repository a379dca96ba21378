//! HTTP handlers for the Air Quality Dashboard API

pub mod air_quality;
pub mod health;
pub mod location;
pub mod predictor;

pub use air_quality::*;
pub use health::*;
pub use location::*;
pub use predictor::*;
