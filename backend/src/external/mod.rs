//! External API integrations

pub mod waqi;
pub mod weather;

pub use waqi::WaqiClient;
pub use weather::WeatherClient;
