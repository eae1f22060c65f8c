// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Cyclone classifier
//!
//! Qualification is a disjunction of wind, pressure and condition-text
//! gates; classification follows the India Meteorological Department wind
//! scale, with a pressure-only fallback when no wind reading is available.

use chrono::Duration;

use super::{AlertLevel, DetectorInput, HazardAlert, HazardParameters, HazardType};

const EXPIRY_HOURS: i64 = 12;

const STORM_TERMS: &[&str] = &["storm", "thunder", "cyclone", "hurricane", "typhoon", "squall", "gale"];

/// IMD cyclonic-disturbance categories, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImdCategory {
    LowPressureArea,
    Depression,
    DeepDepression,
    CyclonicStorm,
    SevereCyclonicStorm,
    VerySevereCyclonicStorm,
    ExtremelySevereCyclonicStorm,
    SuperCyclonicStorm,
}

impl ImdCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ImdCategory::LowPressureArea => "Low Pressure Area",
            ImdCategory::Depression => "Depression",
            ImdCategory::DeepDepression => "Deep Depression",
            ImdCategory::CyclonicStorm => "Cyclonic Storm",
            ImdCategory::SevereCyclonicStorm => "Severe Cyclonic Storm",
            ImdCategory::VerySevereCyclonicStorm => "Very Severe Cyclonic Storm",
            ImdCategory::ExtremelySevereCyclonicStorm => "Extremely Severe Cyclonic Storm",
            ImdCategory::SuperCyclonicStorm => "Super Cyclonic Storm",
        }
    }

    pub fn alert_level(&self) -> AlertLevel {
        match self {
            ImdCategory::SuperCyclonicStorm | ImdCategory::ExtremelySevereCyclonicStorm => AlertLevel::Critical,
            ImdCategory::VerySevereCyclonicStorm | ImdCategory::SevereCyclonicStorm => AlertLevel::Warning,
            ImdCategory::CyclonicStorm | ImdCategory::DeepDepression => AlertLevel::Watch,
            ImdCategory::Depression | ImdCategory::LowPressureArea => AlertLevel::Advisory,
        }
    }
}

/// IMD wind-speed step function; total over all non-negative speeds
pub fn classify_wind(wind_kph: f64) -> ImdCategory {
    if wind_kph >= 222.0 {
        ImdCategory::SuperCyclonicStorm
    } else if wind_kph >= 167.0 {
        ImdCategory::ExtremelySevereCyclonicStorm
    } else if wind_kph >= 118.0 {
        ImdCategory::VerySevereCyclonicStorm
    } else if wind_kph >= 89.0 {
        ImdCategory::SevereCyclonicStorm
    } else if wind_kph >= 62.0 {
        ImdCategory::CyclonicStorm
    } else if wind_kph >= 50.0 {
        ImdCategory::DeepDepression
    } else if wind_kph >= 31.0 {
        ImdCategory::Depression
    } else {
        ImdCategory::LowPressureArea
    }
}

/// Pressure-only fallback for snapshots with no usable wind reading
pub fn classify_pressure(pressure_mb: f64) -> ImdCategory {
    if pressure_mb < 950.0 {
        ImdCategory::SevereCyclonicStorm
    } else if pressure_mb < 980.0 {
        ImdCategory::CyclonicStorm
    } else if pressure_mb < 1000.0 {
        ImdCategory::DeepDepression
    } else if pressure_mb < 1005.0 {
        ImdCategory::Depression
    } else {
        ImdCategory::LowPressureArea
    }
}

pub fn detect(input: &DetectorInput<'_>) -> Option<HazardAlert> {
    let th = &input.thresholds.cyclone;
    let w = input.weather;
    let condition = w.condition.to_lowercase();
    let storm_text = STORM_TERMS.iter().any(|term| condition.contains(term));

    let qualifies = w.wind_kph >= th.min_wind_kph
        || w.pressure_mb < th.low_pressure_mb
        || (w.wind_kph >= 31.0 && w.pressure_mb < 1005.0 && w.precip_mm > 10.0)
        || (storm_text && w.wind_kph >= 25.0 && w.pressure_mb < 1010.0);
    if !qualifies {
        return None;
    }

    let category = if w.wind_kph > 0.0 {
        classify_wind(w.wind_kph)
    } else {
        classify_pressure(w.pressure_mb)
    };
    let level = category.alert_level();
    let confidence = if w.wind_kph >= 62.0 { 0.85 } else { 0.70 };

    Some(HazardAlert::new(
        HazardType::Cyclone,
        level,
        input.location,
        input.now,
        Duration::hours(EXPIRY_HOURS),
        HazardParameters::Cyclone {
            imd_category: category.label().to_string(),
            wind_kph: w.wind_kph,
            gust_kph: w.gust_kph,
            pressure_mb: w.pressure_mb,
        },
        confidence,
        "imd_classification",
        recommendations(level),
    ))
}

fn recommendations(level: AlertLevel) -> Vec<String> {
    match level {
        AlertLevel::Critical => vec![
            "Evacuate coastal and low-lying areas as directed by authorities".to_string(),
            "Suspend all fishing and port operations".to_string(),
            "Shelter in a reinforced building away from windows".to_string(),
        ],
        AlertLevel::Warning => vec![
            "Fishermen must not venture into the sea".to_string(),
            "Secure loose objects and prepare for power outages".to_string(),
            "Avoid travel along the coastline".to_string(),
        ],
        AlertLevel::Watch => vec![
            "Fishing vessels should return to harbour".to_string(),
            "Monitor official cyclone bulletins".to_string(),
        ],
        _ => vec![
            "A low-pressure system is being monitored; stay informed".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::super::test_support::*;
    use super::*;
    use crate::config::Thresholds;

    fn detect_with(weather: crate::telemetry::WeatherParams) -> Option<HazardAlert> {
        let location = chennai();
        let marine = no_marine();
        let thresholds = Thresholds::default();
        detect(&DetectorInput {
            location: &location,
            weather: &weather,
            marine: &marine,
            earthquakes: &[],
            thresholds: &thresholds,
            now: Utc::now(),
        })
    }

    #[test]
    fn severe_cyclonic_storm_scenario() {
        // 95 km/h at 978 mb: Severe Cyclonic Storm, Warning
        let mut weather = calm_weather();
        weather.wind_kph = 95.0;
        weather.pressure_mb = 978.0;

        let alert = detect_with(weather).unwrap();
        assert_eq!(alert.alert_level, AlertLevel::Warning);
        assert_eq!(alert.confidence, 0.85);
        match &alert.parameters {
            HazardParameters::Cyclone { imd_category, .. } => {
                assert_eq!(imd_category, "Severe Cyclonic Storm");
            }
            _ => panic!("wrong parameter variant"),
        }
    }

    #[test]
    fn calm_weather_never_qualifies() {
        assert!(detect_with(calm_weather()).is_none());
    }

    #[test]
    fn imd_wind_scale_is_a_total_step_function() {
        let cases = [
            (0.0, ImdCategory::LowPressureArea),
            (30.9, ImdCategory::LowPressureArea),
            (31.0, ImdCategory::Depression),
            (49.9, ImdCategory::Depression),
            (50.0, ImdCategory::DeepDepression),
            (61.9, ImdCategory::DeepDepression),
            (62.0, ImdCategory::CyclonicStorm),
            (88.9, ImdCategory::CyclonicStorm),
            (89.0, ImdCategory::SevereCyclonicStorm),
            (117.9, ImdCategory::SevereCyclonicStorm),
            (118.0, ImdCategory::VerySevereCyclonicStorm),
            (166.9, ImdCategory::VerySevereCyclonicStorm),
            (167.0, ImdCategory::ExtremelySevereCyclonicStorm),
            (221.9, ImdCategory::ExtremelySevereCyclonicStorm),
            (222.0, ImdCategory::SuperCyclonicStorm),
            (300.0, ImdCategory::SuperCyclonicStorm),
        ];
        for (wind, expected) in cases {
            assert_eq!(classify_wind(wind), expected, "wind {wind}");
        }
    }

    #[test]
    fn pressure_fallback_bands() {
        assert_eq!(classify_pressure(940.0), ImdCategory::SevereCyclonicStorm);
        assert_eq!(classify_pressure(975.0), ImdCategory::CyclonicStorm);
        assert_eq!(classify_pressure(995.0), ImdCategory::DeepDepression);
        assert_eq!(classify_pressure(1002.0), ImdCategory::Depression);
        assert_eq!(classify_pressure(1010.0), ImdCategory::LowPressureArea);
    }

    #[test]
    fn super_cyclone_is_critical() {
        let mut weather = calm_weather();
        weather.wind_kph = 230.0;
        weather.pressure_mb = 915.0;
        let alert = detect_with(weather).unwrap();
        assert_eq!(alert.alert_level, AlertLevel::Critical);
    }

    #[test]
    fn storm_text_heuristic_qualifies_marginal_wind() {
        let mut weather = calm_weather();
        weather.wind_kph = 27.0;
        weather.pressure_mb = 1007.0;
        weather.condition = "Thundery outbreaks possible".to_string();
        let alert = detect_with(weather).unwrap();
        // Sub-depression wind classifies as Low Pressure Area
        assert_eq!(alert.alert_level, AlertLevel::Advisory);
        assert_eq!(alert.confidence, 0.70);
    }

    #[test]
    fn moderate_wind_with_rain_and_falling_pressure_qualifies() {
        let mut weather = calm_weather();
        weather.wind_kph = 35.0;
        weather.pressure_mb = 1003.0;
        weather.precip_mm = 12.0;
        let alert = detect_with(weather).unwrap();
        assert_eq!(alert.alert_level, AlertLevel::Advisory);
    }
}
