//! Deterministic AQI estimation from pollutant and environmental readings
//!
//! A fixed-weight linear formula, not a learned model: there is no training
//! phase and no model artifact. The trait seam exists so a real predictor
//! can be plugged in later without touching the callers.

use rand::{thread_rng, Rng};

use crate::models::{clamp_aqi, Pollutants};

/// Estimates an AQI value from current readings
pub trait Predictor {
    fn estimate_aqi(
        &self,
        pollutants: &Pollutants,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
    ) -> i32;
}

/// Fixed-weight linear heuristic
///
/// Inputs are normalized to [0, 1] with per-pollutant divisors, combined
/// with fixed weights and scaled onto the 1..=500 AQI range. Wind and
/// humidity carry negative weights since both disperse pollutants.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPredictor;

impl HeuristicPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Project pollutant levels `days_ahead` days out
    ///
    /// Each pollutant follows its own multiplicative trend (ozone creeps up
    /// with sunlight, the rest decay slightly) compounded daily and scaled
    /// by how far temperature, humidity and wind sit from their baselines.
    /// Outputs are floored at 1 (0.1 for CO), never zero or negative.
    pub fn project_pollutants(
        &self,
        current: &Pollutants,
        days_ahead: u32,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
    ) -> Pollutants {
        let mut rng = thread_rng();

        let environment_factor = 1.0
            + 0.02 * (temperature - 25.0) / 10.0
            - 0.01 * (humidity - 50.0) / 50.0
            - 0.03 * wind_speed / 10.0;

        let mut project = |value: f64, base_trend: f64| {
            let trend = base_trend + rng.gen_range(0.0..0.1);
            (value * (trend * environment_factor).powi(days_ahead as i32))
                .round()
                .max(1.0)
        };

        let pm25 = project(current.pm25, 0.95);
        let pm10 = project(current.pm10, 0.93);
        let o3 = project(current.o3, 1.02);
        let no2 = project(current.no2, 0.97);
        let so2 = project(current.so2, 0.96);

        // CO is reported on a smaller scale; keep one decimal and a lower floor
        let co_trend = 0.95 + rng.gen_range(0.0..0.1);
        let co = ((current.co * (co_trend * environment_factor).powi(days_ahead as i32)) * 10.0)
            .round()
            / 10.0;

        Pollutants {
            pm25,
            pm10,
            o3,
            no2,
            so2,
            co: co.max(0.1),
        }
    }
}

impl Predictor for HeuristicPredictor {
    fn estimate_aqi(
        &self,
        pollutants: &Pollutants,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
    ) -> i32 {
        // Min-max normalization against typical upper bounds
        let n_pm25 = (pollutants.pm25 / 300.0).min(1.0);
        let n_pm10 = (pollutants.pm10 / 500.0).min(1.0);
        let n_o3 = (pollutants.o3 / 200.0).min(1.0);
        let n_no2 = (pollutants.no2 / 200.0).min(1.0);
        let n_so2 = (pollutants.so2 / 200.0).min(1.0);
        let n_co = (pollutants.co / 30.0).min(1.0);
        let n_temperature = (temperature.clamp(10.0, 45.0) - 10.0) / 35.0;
        let n_humidity = humidity / 100.0;
        let n_wind = (wind_speed / 30.0).min(1.0);

        let weighted_sum = n_pm25 * 0.5
            + n_pm10 * 0.2
            + n_o3 * 0.15
            + n_no2 * 0.1
            + n_so2 * 0.05
            + n_co * 0.05
            + n_temperature * 0.1
            - n_humidity * 0.05
            - n_wind * 0.15;

        clamp_aqi(weighted_sum * 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heavy_pollution() -> Pollutants {
        Pollutants {
            pm25: 300.0,
            pm10: 500.0,
            o3: 200.0,
            no2: 200.0,
            so2: 200.0,
            co: 30.0,
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let predictor = HeuristicPredictor::new();
        let pollutants = Pollutants {
            pm25: 155.0,
            pm10: 220.0,
            o3: 31.0,
            no2: 48.0,
            so2: 9.0,
            co: 1.2,
        };
        let first = predictor.estimate_aqi(&pollutants, 32.0, 58.0, 7.0);
        let second = predictor.estimate_aqi(&pollutants, 32.0, 58.0, 7.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_estimate_floors_at_one() {
        // All-zero pollution with nothing to disperse still yields 1, not 0
        let predictor = HeuristicPredictor::new();
        let aqi = predictor.estimate_aqi(&Pollutants::default(), 10.0, 0.0, 0.0);
        assert_eq!(aqi, 1);
    }

    #[test]
    fn test_estimate_saturates_at_five_hundred() {
        let predictor = HeuristicPredictor::new();
        let aqi = predictor.estimate_aqi(&heavy_pollution(), 45.0, 0.0, 0.0);
        assert_eq!(aqi, 500);
    }

    #[test]
    fn test_wind_and_humidity_reduce_estimate() {
        let predictor = HeuristicPredictor::new();
        let pollutants = Pollutants {
            pm25: 120.0,
            pm10: 150.0,
            o3: 60.0,
            no2: 40.0,
            so2: 15.0,
            co: 2.0,
        };
        let calm = predictor.estimate_aqi(&pollutants, 25.0, 0.0, 0.0);
        let windy = predictor.estimate_aqi(&pollutants, 25.0, 90.0, 30.0);
        assert!(windy < calm);
    }

    #[test]
    fn test_projection_stays_above_floors() {
        let predictor = HeuristicPredictor::new();
        for days in 0..=7 {
            let projected =
                predictor.project_pollutants(&Pollutants::default(), days, 25.0, 50.0, 10.0);
            assert!(projected.pm25 >= 1.0);
            assert!(projected.pm10 >= 1.0);
            assert!(projected.o3 >= 1.0);
            assert!(projected.no2 >= 1.0);
            assert!(projected.so2 >= 1.0);
            assert!(projected.co >= 0.1);
        }
    }

    #[test]
    fn test_projection_day_zero_keeps_magnitudes() {
        // Any trend to the zeroth power is 1, so day 0 only rounds
        let predictor = HeuristicPredictor::new();
        let current = Pollutants {
            pm25: 88.0,
            pm10: 120.0,
            o3: 35.0,
            no2: 22.0,
            so2: 8.0,
            co: 1.5,
        };
        let projected = predictor.project_pollutants(&current, 0, 25.0, 50.0, 10.0);
        assert_eq!(projected.pm25, 88.0);
        assert_eq!(projected.pm10, 120.0);
        assert_eq!(projected.co, 1.5);
    }
}
