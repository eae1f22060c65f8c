// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! High-wave classifier
//!
//! Uses significant wave height from the marine feed when present, with a
//! wind-derived proxy (`wind_kph / 25`) otherwise; swell height is a second
//! independent qualification gate.

use chrono::Duration;

use super::{AlertLevel, DetectorInput, HazardAlert, HazardParameters, HazardType};

const EXPIRY_HOURS: i64 = 6;

pub fn detect(input: &DetectorInput<'_>) -> Option<HazardAlert> {
    let th = &input.thresholds.high_waves;
    let wind_proxy = input.weather.wind_kph / 25.0;
    let effective_height = input.marine.sig_ht_mt.unwrap_or(0.0).max(wind_proxy);
    let swell = input.marine.swell_ht_mt.unwrap_or(0.0);

    if effective_height <= th.sig_height_mt && swell <= th.swell_height_mt {
        return None;
    }

    let driver = effective_height.max(swell);
    let level = if driver > 8.0 {
        AlertLevel::Critical
    } else if driver > 6.0 {
        AlertLevel::Warning
    } else if driver > 5.0 {
        AlertLevel::Watch
    } else {
        AlertLevel::Advisory
    };

    Some(HazardAlert::new(
        HazardType::HighWaves,
        level,
        input.location,
        input.now,
        Duration::hours(EXPIRY_HOURS),
        HazardParameters::HighWaves {
            effective_height_mt: effective_height,
            swell_ht_mt: swell,
            swell_period_secs: input.marine.swell_period_secs.unwrap_or(0.0),
        },
        0.80,
        "wave_height_threshold",
        recommendations(level),
    ))
}

fn recommendations(level: AlertLevel) -> Vec<String> {
    match level {
        AlertLevel::Critical | AlertLevel::Warning => vec![
            "Suspend all beach and nearshore activity".to_string(),
            "Small craft must remain in harbour".to_string(),
            "Keep well clear of sea walls and rocky outcrops".to_string(),
        ],
        _ => vec![
            "Exercise caution along the shoreline; waves are above normal".to_string(),
            "Swimmers and small boats should stay close to shore".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::super::test_support::*;
    use super::*;
    use crate::config::Thresholds;

    fn detect_with(
        weather: crate::telemetry::WeatherParams,
        marine: crate::telemetry::MarineParams,
    ) -> Option<HazardAlert> {
        let location = chennai();
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
    fn modest_seas_never_alert() {
        // 2.0 m significant, 1.0 m swell, light wind: proxy is 0.4 m
        let mut marine = no_marine();
        marine.sig_ht_mt = Some(2.0);
        marine.swell_ht_mt = Some(1.0);
        assert!(detect_with(calm_weather(), marine).is_none());
    }

    #[test]
    fn wind_proxy_substitutes_for_missing_marine_data() {
        let mut weather = calm_weather();
        weather.wind_kph = 130.0; // proxy 5.2 m
        let alert = detect_with(weather, no_marine()).unwrap();
        assert_eq!(alert.alert_level, AlertLevel::Watch);
        match alert.parameters {
            HazardParameters::HighWaves { effective_height_mt, .. } => {
                assert!((effective_height_mt - 5.2).abs() < 1e-9);
            }
            _ => panic!("wrong parameter variant"),
        }
    }

    #[test]
    fn extreme_significant_height_is_critical() {
        let mut marine = no_marine();
        marine.sig_ht_mt = Some(8.5);
        let alert = detect_with(calm_weather(), marine).unwrap();
        assert_eq!(alert.alert_level, AlertLevel::Critical);
        assert_eq!(alert.confidence, 0.80);
    }

    #[test]
    fn swell_alone_can_qualify() {
        let mut marine = no_marine();
        marine.sig_ht_mt = Some(1.0);
        marine.swell_ht_mt = Some(3.5);
        let alert = detect_with(calm_weather(), marine).unwrap();
        // Level driven by the larger of effective height and swell
        assert_eq!(alert.alert_level, AlertLevel::Advisory);
    }

    #[test]
    fn boundary_heights_do_not_qualify() {
        let mut marine = no_marine();
        marine.sig_ht_mt = Some(4.0);
        marine.swell_ht_mt = Some(3.0);
        assert!(detect_with(calm_weather(), marine).is_none());
    }
}
