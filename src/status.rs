// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Per-location status aggregation
//!
//! Folds the active alerts and the latest telemetry snapshot into one
//! `LocationStatus` view, recomputed each detection cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::{AlertLevel, HazardAlert, HazardType};
use crate::registry::MonitoredLocation;
use crate::telemetry::{MarineParams, WeatherParams};

pub const NO_ACTIVE_HAZARDS: &str = "No active hazard advisories for this location";

/// Aggregated view of one location, recomputed per cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationStatus {
    pub location_id: String,
    pub max_alert_level: AlertLevel,
    pub active_hazards: Vec<HazardType>,
    pub last_weather: Option<WeatherParams>,
    pub last_marine: Option<MarineParams>,
    pub weather_score: f64,
    pub recommendations: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Composite 0-100 severity score over the latest snapshot
pub fn weather_score(weather: &WeatherParams, marine: &MarineParams) -> f64 {
    let wind = (weather.wind_kph / 3.0).min(30.0);
    let rain = (weather.precip_mm / 4.0).min(25.0);
    let pressure = if weather.pressure_mb < 1000.0 {
        ((1000.0 - weather.pressure_mb) / 3.0).min(20.0)
    } else {
        0.0
    };
    let waves = (marine.sig_ht_mt.unwrap_or(0.0) * 5.0).min(25.0);
    (wind + rain + pressure + waves).clamp(0.0, 100.0)
}

/// Merge alert recommendations: the top two from each alert in descending
/// level order, deduplicated preserving order, capped at five.
pub fn merge_recommendations(alerts: &[HazardAlert]) -> Vec<String> {
    let mut ordered: Vec<&HazardAlert> = alerts.iter().collect();
    ordered.sort_by(|a, b| b.alert_level.cmp(&a.alert_level));

    let mut merged: Vec<String> = Vec::new();
    for alert in ordered {
        for rec in alert.recommendations.iter().take(2) {
            if !merged.contains(rec) {
                merged.push(rec.clone());
            }
            if merged.len() == 5 {
                return merged;
            }
        }
    }

    if merged.is_empty() {
        merged.push(NO_ACTIVE_HAZARDS.to_string());
    }
    merged
}

/// Build the per-cycle status for a location
pub fn build_status(
    location: &MonitoredLocation,
    active: &[HazardAlert],
    weather: Option<WeatherParams>,
    marine: Option<MarineParams>,
    now: DateTime<Utc>,
) -> LocationStatus {
    let max_alert_level = active
        .iter()
        .map(|alert| alert.alert_level)
        .max()
        .unwrap_or(AlertLevel::Normal);

    let mut by_level: Vec<&HazardAlert> = active.iter().collect();
    by_level.sort_by(|a, b| b.alert_level.cmp(&a.alert_level));
    let active_hazards = by_level.iter().map(|alert| alert.hazard_type).collect();

    let score = match (&weather, &marine) {
        (Some(w), Some(m)) => weather_score(w, m),
        _ => 0.0,
    };

    LocationStatus {
        location_id: location.id.clone(),
        max_alert_level,
        active_hazards,
        last_weather: weather,
        last_marine: marine,
        weather_score: score,
        recommendations: merge_recommendations(active),
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::detection::test_support::{calm_weather, chennai, no_marine};
    use crate::detection::HazardParameters;

    fn alert(hazard: HazardType, level: AlertLevel, recs: &[&str]) -> HazardAlert {
        let location = chennai();
        HazardAlert::new(
            hazard,
            level,
            &location,
            Utc::now(),
            Duration::hours(6),
            HazardParameters::RipCurrents {
                sig_ht_mt: 3.0,
                swell_period_secs: 15.0,
            },
            0.7,
            "test",
            recs.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn weather_score_is_near_zero_for_calm_conditions() {
        let score = weather_score(&calm_weather(), &no_marine());
        // Only the light wind contributes: 10/3
        assert!((score - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn weather_score_clamps_each_component() {
        let mut weather = calm_weather();
        weather.wind_kph = 300.0;
        weather.precip_mm = 500.0;
        weather.pressure_mb = 900.0;
        let mut marine = no_marine();
        marine.sig_ht_mt = Some(12.0);
        assert_eq!(weather_score(&weather, &marine), 100.0);
    }

    #[test]
    fn storm_score_is_partial_when_components_are_moderate() {
        let mut weather = calm_weather();
        weather.wind_kph = 60.0; // 20
        weather.precip_mm = 40.0; // 10
        weather.pressure_mb = 991.0; // 3
        let mut marine = no_marine();
        marine.sig_ht_mt = Some(2.0); // 10
        assert!((weather_score(&weather, &marine) - 43.0).abs() < 1e-9);
    }

    #[test]
    fn recommendations_take_top_two_per_alert_in_level_order() {
        let alerts = vec![
            alert(HazardType::RipCurrents, AlertLevel::Advisory, &["r1", "r2", "r3"]),
            alert(HazardType::Cyclone, AlertLevel::Critical, &["c1", "c2", "c3"]),
        ];
        let merged = merge_recommendations(&alerts);
        assert_eq!(merged, vec!["c1", "c2", "r1", "r2"]);
    }

    #[test]
    fn recommendations_dedup_and_cap_at_five() {
        let alerts = vec![
            alert(HazardType::Cyclone, AlertLevel::Critical, &["a", "b"]),
            alert(HazardType::CoastalFlood, AlertLevel::Warning, &["b", "c"]),
            alert(HazardType::HighWaves, AlertLevel::Watch, &["d", "e"]),
            alert(HazardType::RipCurrents, AlertLevel::Advisory, &["f", "g"]),
        ];
        let merged = merge_recommendations(&alerts);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn no_alerts_yields_the_quiet_message() {
        assert_eq!(merge_recommendations(&[]), vec![NO_ACTIVE_HAZARDS.to_string()]);
    }

    #[test]
    fn status_max_level_defaults_to_normal() {
        let location = chennai();
        let status = build_status(&location, &[], Some(calm_weather()), Some(no_marine()), Utc::now());
        assert_eq!(status.max_alert_level, AlertLevel::Normal);
        assert!(status.active_hazards.is_empty());
        assert_eq!(status.recommendations, vec![NO_ACTIVE_HAZARDS.to_string()]);
    }

    #[test]
    fn status_max_level_tracks_most_severe_alert() {
        let location = chennai();
        let alerts = vec![
            alert(HazardType::HighWaves, AlertLevel::Watch, &["w"]),
            alert(HazardType::Cyclone, AlertLevel::Critical, &["c"]),
        ];
        let status = build_status(&location, &alerts, Some(calm_weather()), Some(no_marine()), Utc::now());
        assert_eq!(status.max_alert_level, AlertLevel::Critical);
        assert_eq!(status.active_hazards, vec![HazardType::Cyclone, HazardType::HighWaves]);
    }
}
