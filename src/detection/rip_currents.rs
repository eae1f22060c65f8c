// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Rip-current classifier
//!
//! Long-period swell combined with elevated significant height is the
//! precursor signal. Both readings fall back to wind-derived estimates when
//! the marine feed is absent; the period estimate only exists above 30 km/h
//! of wind, so calm seas can never qualify on proxies alone.

use chrono::Duration;

use super::{AlertLevel, DetectorInput, HazardAlert, HazardParameters, HazardType};

const EXPIRY_HOURS: i64 = 6;

pub fn detect(input: &DetectorInput<'_>) -> Option<HazardAlert> {
    let th = &input.thresholds.rip_currents;
    let wind = input.weather.wind_kph;

    let sig_ht = input.marine.sig_ht_mt.unwrap_or(wind / 25.0);
    let swell_period = input.marine.swell_period_secs.unwrap_or(if wind > 30.0 {
        10.0 + (wind - 30.0) / 10.0
    } else {
        0.0
    });

    if !(swell_period > th.swell_period_secs && sig_ht > th.sig_height_mt) {
        return None;
    }

    let level = if sig_ht > 4.0 && swell_period > 18.0 {
        AlertLevel::Warning
    } else if sig_ht > 3.5 || swell_period > 16.0 {
        AlertLevel::Watch
    } else {
        AlertLevel::Advisory
    };

    Some(HazardAlert::new(
        HazardType::RipCurrents,
        level,
        input.location,
        input.now,
        Duration::hours(EXPIRY_HOURS),
        HazardParameters::RipCurrents {
            sig_ht_mt: sig_ht,
            swell_period_secs: swell_period,
        },
        0.70,
        "swell_period_threshold",
        recommendations(level),
    ))
}

fn recommendations(level: AlertLevel) -> Vec<String> {
    match level {
        AlertLevel::Warning => vec![
            "Do not enter the water; strong rip currents are likely".to_string(),
            "Keep children and non-swimmers well away from the surf zone".to_string(),
        ],
        _ => vec![
            "Swim only at lifeguarded beaches and heed flag warnings".to_string(),
            "If caught in a rip, swim parallel to the shore to escape".to_string(),
        ],
    }
}
