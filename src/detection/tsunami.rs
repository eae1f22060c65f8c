// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Tsunami classifier
//!
//! Seismic precursor rules: a recent oceanic earthquake qualifies when it is
//! strong enough, shallow enough and close enough to the location. When
//! several events qualify, the most severe candidate wins; the detector
//! still emits at most one alert.

use chrono::Duration;

use super::{AlertLevel, DetectorInput, HazardAlert, HazardParameters, HazardType};
use crate::telemetry::EarthquakeEvent;

const EXPIRY_HOURS: i64 = 6;

pub fn detect(input: &DetectorInput<'_>) -> Option<HazardAlert> {
    let th = &input.thresholds.tsunami;

    let mut best: Option<(AlertLevel, f64, &EarthquakeEvent)> = None;
    for quake in input.earthquakes {
        if quake.magnitude < th.min_magnitude || quake.depth_km > th.max_depth_km || !quake.is_oceanic {
            continue;
        }
        let distance_km = input.location.coordinates.distance_km(&quake.coordinates);
        if distance_km > th.max_distance_km {
            continue;
        }

        let level = classify(quake.magnitude, distance_km);
        let supersedes = match &best {
            None => true,
            Some((best_level, best_distance, best_quake)) => {
                level > *best_level
                    || (level == *best_level && quake.magnitude > best_quake.magnitude)
                    || (level == *best_level
                        && quake.magnitude == best_quake.magnitude
                        && distance_km < *best_distance)
            }
        };
        if supersedes {
            best = Some((level, distance_km, quake));
        }
    }

    let (level, distance_km, quake) = best?;
    let confidence = (0.5 + quake.magnitude / 20.0).min(0.95);

    Some(HazardAlert::new(
        HazardType::Tsunami,
        level,
        input.location,
        input.now,
        Duration::hours(EXPIRY_HOURS),
        HazardParameters::Tsunami {
            magnitude: quake.magnitude,
            depth_km: quake.depth_km,
            distance_km,
            epicenter: quake.coordinates,
            event_id: quake.id.clone(),
        },
        confidence,
        "seismic_threshold",
        recommendations(level),
    ))
}

fn classify(magnitude: f64, distance_km: f64) -> AlertLevel {
    if magnitude >= 8.0 && distance_km < 1000.0 {
        AlertLevel::Critical
    } else if magnitude >= 7.5 || distance_km < 500.0 {
        AlertLevel::Warning
    } else if magnitude >= 7.0 {
        AlertLevel::Watch
    } else {
        AlertLevel::Advisory
    }
}

fn recommendations(level: AlertLevel) -> Vec<String> {
    match level {
        AlertLevel::Critical | AlertLevel::Warning => vec![
            "Move immediately to high ground at least 3 km inland".to_string(),
            "Follow official evacuation routes; do not wait to observe the sea".to_string(),
            "Stay away from beaches, harbours and river mouths".to_string(),
        ],
        AlertLevel::Watch => vec![
            "Prepare to evacuate low-lying coastal areas".to_string(),
            "Keep clear of the shoreline and monitor official advisories".to_string(),
        ],
        _ => vec![
            "A distant seismic event is under evaluation; no action required yet".to_string(),
            "Monitor official tsunami advisories".to_string(),
        ],
    }
}
