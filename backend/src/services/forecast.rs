//! Forecast and history synthesis from a single current sample
//!
//! The upstream feeds rarely provide a usable outlook, so the 7-day
//! forecast and 24-hour history are derived from the current reading:
//! cyclical day factors and environmental adjustments scale the AQI, and
//! each day's pollutants keep the current pollutant-to-AQI mix.

use chrono::{Duration, Utc};
use rand::{thread_rng, Rng};

use crate::models::{clamp_aqi, ForecastEntry, HistoryEntry, Pollutants, TemperatureRange};

/// Days covered by a synthesized forecast
pub const FORECAST_DAYS: usize = 7;

/// Hourly points covered by a synthesized history
pub const HISTORY_HOURS: usize = 24;

/// Derives forecast and history series from current conditions
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastSynthesizer;

impl ForecastSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a 7-day forecast anchored to the current reading
    ///
    /// Entry `i` lands on today + `i` days. AQI combines a cyclical day
    /// factor with temperature, humidity and wind adjustments plus bounded
    /// jitter, clamped to 1..=500.
    pub fn synthesize_forecast(
        &self,
        current_aqi: i32,
        pollutants: &Pollutants,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
    ) -> Vec<ForecastEntry> {
        let today = Utc::now();
        let mut rng = thread_rng();

        let temperature_factor = if temperature > 30.0 {
            1.2
        } else if temperature < 15.0 {
            0.8
        } else {
            1.0
        };
        let humidity_factor = if humidity > 80.0 {
            1.3
        } else if humidity < 40.0 {
            0.7
        } else {
            1.0
        };
        let wind_factor = if wind_speed > 20.0 {
            0.6
        } else if wind_speed < 5.0 {
            1.4
        } else {
            1.0
        };

        (0..FORECAST_DAYS)
            .map(|i| {
                let day = i as f64;
                let day_factor = 1.0 + 0.2 * (day * 0.5).sin();
                let jitter = rng.gen_range(0.85..1.15);

                let aqi = clamp_aqi(
                    current_aqi as f64
                        * day_factor
                        * temperature_factor
                        * humidity_factor
                        * wind_factor
                        * jitter,
                );

                let temperature_variation = 3.0 * (day * 0.7).sin();
                let min = (temperature - 5.0 + temperature_variation)
                    .round()
                    .max(10.0)
                    .min(40.0);
                let max = (temperature + 5.0 + temperature_variation)
                    .round()
                    .min(45.0)
                    .max(min + 3.0);

                ForecastEntry {
                    date_time: today + Duration::days(i as i64),
                    aqi,
                    temperature: TemperatureRange { min, max },
                    humidity: (humidity + 10.0 * (day * 0.9).sin())
                        .round()
                        .clamp(30.0, 95.0),
                    wind_speed: (wind_speed + 5.0 * (day * 1.1).sin()).round().max(1.0),
                    pollutants: scale_to_aqi(pollutants, current_aqi, aqi),
                }
            })
            .collect()
    }

    /// Synthesize a 24-hour history, most recent entry first
    pub fn synthesize_history(&self, current_aqi: i32) -> Vec<HistoryEntry> {
        let now = Utc::now();
        let mut rng = thread_rng();

        (0..HISTORY_HOURS)
            .map(|i| {
                let aqi = clamp_aqi(current_aqi as f64 * rng.gen_range(0.7..1.3));
                HistoryEntry {
                    date_time: now - Duration::hours(i as i64),
                    aqi,
                    pollutants: sample_pollutants(aqi, &mut rng),
                }
            })
            .collect()
    }

    /// Build a history from the feed's daily PM2.5 averages
    ///
    /// Used when the station publishes a genuine series: the first 24
    /// points become hourly entries (most recent first) with the average
    /// standing in for both AQI and PM2.5. Missing or non-positive points
    /// get a random draw, so the series is always exactly 24 entries long.
    pub fn history_from_daily_series(&self, series: &[f64]) -> Vec<HistoryEntry> {
        let now = Utc::now();
        let mut rng = thread_rng();

        (0..HISTORY_HOURS)
            .map(|i| {
                let aqi = match series.get(i) {
                    Some(avg) if *avg > 0.0 => clamp_aqi(*avg),
                    _ => rng.gen_range(1..=300),
                };
                HistoryEntry {
                    date_time: now - Duration::hours(i as i64),
                    aqi,
                    pollutants: Pollutants {
                        pm25: aqi as f64,
                        pm10: rng.gen_range(1.0f64..400.0).floor(),
                        o3: rng.gen_range(1.0f64..100.0).floor(),
                        no2: rng.gen_range(1.0f64..150.0).floor(),
                        so2: rng.gen_range(1.0f64..120.0).floor(),
                        co: (rng.gen_range(0.0f64..200.0).floor()) / 10.0,
                    },
                }
            })
            .collect()
    }
}

/// Scale current pollutants onto a target AQI, preserving the mix
///
/// Each pollutant keeps its ratio to the current AQI; only the magnitude
/// follows the target. CO keeps one decimal place.
fn scale_to_aqi(pollutants: &Pollutants, current_aqi: i32, target_aqi: i32) -> Pollutants {
    let base = current_aqi.max(1) as f64;
    let target = target_aqi as f64;

    Pollutants {
        pm25: (target * pollutants.pm25 / base).round(),
        pm10: (target * pollutants.pm10 / base).round(),
        o3: (target * pollutants.o3 / base).round(),
        no2: (target * pollutants.no2 / base).round(),
        so2: (target * pollutants.so2 / base).round(),
        co: (target * pollutants.co / base * 10.0).round() / 10.0,
    }
}

/// Sample a plausible pollutant mix for an AQI value
///
/// Fixed linear ratios of the AQI plus bounded noise, floored at zero.
/// Shared by the history synthesizer and the mock generator.
pub(crate) fn sample_pollutants(aqi: i32, rng: &mut impl Rng) -> Pollutants {
    let aqi = aqi as f64;
    Pollutants {
        pm25: (aqi * 0.8 + rng.gen_range(-10.0..10.0)).floor().max(0.0),
        pm10: (aqi * 1.2 + rng.gen_range(-15.0..15.0)).floor().max(0.0),
        o3: (aqi * 0.3 + rng.gen_range(-5.0..5.0)).floor().max(0.0),
        no2: (aqi * 0.4 + rng.gen_range(-7.0..7.0)).floor().max(0.0),
        so2: (aqi * 0.2 + rng.gen_range(-4.0..4.0)).floor().max(0.0),
        co: ((aqi * 0.05 + rng.gen_range(-1.0..1.0)) * 10.0)
            .round()
            .max(0.0)
            / 10.0,
    }
}
