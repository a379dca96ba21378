//! AQI severity bands and the health advice attached to them
//!
//! Six fixed bands over the US EPA 0-500 scale. Classification is total:
//! out-of-range inputs fall into the nearest band, so there is no error case.

use serde::Serialize;

/// A named AQI severity band with its display color token
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AqiCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

impl AqiCategory {
    /// Classify an AQI value into its severity band
    ///
    /// Band boundaries are inclusive on the upper end (50, 100, 150, 200,
    /// 300); everything above 300 is Hazardous, everything at or below 50
    /// (including negative inputs) is Good.
    pub fn for_aqi(aqi: i32) -> Self {
        if aqi <= 50 {
            Self {
                name: "Good",
                description:
                    "Air quality is satisfactory, and air pollution poses little or no risk.",
                color: "air-good",
            }
        } else if aqi <= 100 {
            Self {
                name: "Moderate",
                description: "Air quality is acceptable. However, there may be a risk for some people, particularly those who are unusually sensitive to air pollution.",
                color: "air-moderate",
            }
        } else if aqi <= 150 {
            Self {
                name: "Unhealthy for Sensitive Groups",
                description: "Members of sensitive groups may experience health effects. The general public is not likely to be affected.",
                color: "air-sensitive",
            }
        } else if aqi <= 200 {
            Self {
                name: "Unhealthy",
                description: "Everyone may begin to experience health effects; members of sensitive groups may experience more serious effects.",
                color: "air-unhealthy",
            }
        } else if aqi <= 300 {
            Self {
                name: "Very Unhealthy",
                description: "Health alert: Everyone may experience more serious health effects.",
                color: "air-veryUnhealthy",
            }
        } else {
            Self {
                name: "Hazardous",
                description: "Health warnings of emergency conditions. The entire population is more likely to be affected.",
                color: "air-hazardous",
            }
        }
    }
}

/// Advisory text for the six AQI bands
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HealthRecommendations {
    pub general: &'static str,
    pub sensitive: &'static str,
    pub outdoor: &'static str,
    pub indoor: &'static str,
    pub mask: &'static str,
}

impl HealthRecommendations {
    /// Health recommendations for an AQI value, total over the same bands
    /// as [`AqiCategory::for_aqi`]
    pub fn for_aqi(aqi: i32) -> Self {
        if aqi <= 50 {
            Self {
                general: "Enjoy your usual outdoor activities.",
                sensitive: "Air quality is good for everyone.",
                outdoor: "Ideal conditions for all outdoor activities.",
                indoor: "No specific recommendations.",
                mask: "Mask is not required.",
            }
        } else if aqi <= 100 {
            Self {
                general: "Air quality is acceptable; however, unusually sensitive people should consider reducing prolonged or heavy exertion.",
                sensitive: "People with respiratory issues, children, and the elderly should limit prolonged outdoor exertion.",
                outdoor: "Most people can enjoy outdoor activities, but sensitive groups should take precautions.",
                indoor: "No specific recommendations.",
                mask: "Mask is generally not required.",
            }
        } else if aqi <= 150 {
            Self {
                general: "General public is not likely to be affected, but sensitive groups may experience health effects.",
                sensitive: "People with heart or lung disease, older adults, and children should reduce prolonged or heavy exertion.",
                outdoor: "Limit prolonged outdoor exertion.",
                indoor: "Consider using an air purifier.",
                mask: "Sensitive groups should consider wearing a mask.",
            }
        } else if aqi <= 200 {
            Self {
                general: "Everyone may begin to experience health effects; sensitive groups may experience more serious effects.",
                sensitive: "People with heart or lung disease, older adults, and children should avoid prolonged or heavy exertion; everyone else should reduce exertion.",
                outdoor: "Reduce outdoor activities.",
                indoor: "Use an air purifier and keep windows closed.",
                mask: "Everyone should consider wearing a mask, especially outdoors.",
            }
        } else if aqi <= 300 {
            Self {
                general: "Health alert: everyone may experience more serious health effects.",
                sensitive: "People with heart or lung disease, older adults, and children should avoid all physical activity outdoors; everyone else should avoid prolonged or heavy exertion.",
                outdoor: "Avoid all outdoor activities.",
                indoor: "Use an air purifier and stay indoors.",
                mask: "Everyone should wear a mask, and consider avoiding going out.",
            }
        } else {
            Self {
                general: "Health warnings of emergency conditions. The entire population is more likely to be affected.",
                sensitive: "Everyone should remain indoors.",
                outdoor: "Avoid all outdoor activities.",
                indoor: "Stay indoors and use an air purifier.",
                mask: "Everyone should wear a high-quality mask and avoid going out.",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(AqiCategory::for_aqi(0).name, "Good");
        assert_eq!(AqiCategory::for_aqi(50).name, "Good");
        assert_eq!(AqiCategory::for_aqi(51).name, "Moderate");
        assert_eq!(AqiCategory::for_aqi(100).name, "Moderate");
        assert_eq!(AqiCategory::for_aqi(101).name, "Unhealthy for Sensitive Groups");
        assert_eq!(AqiCategory::for_aqi(150).name, "Unhealthy for Sensitive Groups");
        assert_eq!(AqiCategory::for_aqi(151).name, "Unhealthy");
        assert_eq!(AqiCategory::for_aqi(200).name, "Unhealthy");
        assert_eq!(AqiCategory::for_aqi(201).name, "Very Unhealthy");
        assert_eq!(AqiCategory::for_aqi(300).name, "Very Unhealthy");
        assert_eq!(AqiCategory::for_aqi(301).name, "Hazardous");
        assert_eq!(AqiCategory::for_aqi(500).name, "Hazardous");
    }

    #[test]
    fn test_classification_is_total() {
        // Out-of-range inputs land in the nearest band instead of failing
        assert_eq!(AqiCategory::for_aqi(-40).name, "Good");
        assert_eq!(AqiCategory::for_aqi(9_999).name, "Hazardous");
    }

    #[test]
    fn test_recommendations_track_bands() {
        let good = HealthRecommendations::for_aqi(30);
        let hazardous = HealthRecommendations::for_aqi(420);
        assert_eq!(good.mask, "Mask is not required.");
        assert_ne!(good.mask, hazardous.mask);
        assert_eq!(hazardous.sensitive, "Everyone should remain indoors.");
    }

    fn band_index(aqi: i32) -> usize {
        [50, 100, 150, 200, 300]
            .iter()
            .position(|bound| aqi <= *bound)
            .unwrap_or(5)
    }

    proptest! {
        /// The six bands partition 0..=500 with no gaps or overlaps
        #[test]
        fn prop_bands_partition_domain(aqi in 0i32..=500) {
            let names = [
                "Good",
                "Moderate",
                "Unhealthy for Sensitive Groups",
                "Unhealthy",
                "Very Unhealthy",
                "Hazardous",
            ];
            prop_assert_eq!(AqiCategory::for_aqi(aqi).name, names[band_index(aqi)]);
        }

        /// Severity never decreases as AQI increases
        #[test]
        fn prop_bands_monotonic(aqi in 0i32..500) {
            prop_assert!(band_index(aqi) <= band_index(aqi + 1));
        }

        /// Out-of-range inputs classify the same as their clamped value
        #[test]
        fn prop_classification_clamps(aqi in -1000i32..=10_000) {
            let clamped = aqi.clamp(0, 500);
            prop_assert_eq!(AqiCategory::for_aqi(aqi), AqiCategory::for_aqi(clamped));
            prop_assert_eq!(
                HealthRecommendations::for_aqi(aqi),
                HealthRecommendations::for_aqi(clamped)
            );
        }
    }
}
