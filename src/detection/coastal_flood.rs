// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Coastal-flood classifier
//!
//! Five independent triggers (tidal, heavy rain, storm-surge risk, ground
//! saturation, condition-text inference) feed one label-selection rule over
//! IMD rainfall bands. The triggers are NOT mutually exclusive branches:
//! several may fire at once, but only one flood label is reported, chosen by
//! the fixed band order below.

use chrono::Duration;

use super::{AlertLevel, DetectorInput, HazardAlert, HazardParameters, HazardType};

const EXPIRY_HOURS: i64 = 12;

const RAIN_TERMS: &[&str] = &["rain", "thunder", "storm", "shower"];
const FLOOD_TERMS: &[&str] = &["heavy rain", "torrential", "flood", "thunder"];

pub fn detect(input: &DetectorInput<'_>) -> Option<HazardAlert> {
    let th = &input.thresholds.coastal_flood;
    let w = input.weather;
    let condition = w.condition.to_lowercase();

    let surge_factor = ((1000.0 - w.pressure_mb) / 50.0).max(0.0)
        + if w.wind_kph > 40.0 { w.wind_kph / 200.0 } else { 0.0 };
    let effective_tide =
        input.marine.tide_height_mt.unwrap_or(0.0) + w.wind_kph / 100.0 + surge_factor;

    let rain_text = RAIN_TERMS.iter().any(|term| condition.contains(term));
    let flood_text = FLOOD_TERMS.iter().any(|term| condition.contains(term));

    let tidal = effective_tide > th.tidal_surge_mt && w.precip_mm >= 20.0;
    let heavy_rain = w.precip_mm > th.heavy_rain_mm;
    let surge_risk = w.pressure_mb < 1000.0 && w.wind_kph > 40.0 && w.precip_mm > 15.0;
    let saturation = w.humidity > 85.0 && w.precip_mm > 20.0 && rain_text;
    let text_inference = flood_text && w.humidity > 80.0;

    if !(tidal || heavy_rain || surge_risk || saturation || text_inference) {
        return None;
    }

    // Condition-text inference may re-estimate precipitation upward before
    // leveling; never downward, so a measured extreme always dominates.
    let mut precip = w.precip_mm;
    if text_inference {
        let estimate = if condition.contains("heavy") || condition.contains("torrential") {
            40.0
        } else if condition.contains("moderate") {
            25.0
        } else {
            precip
        };
        precip = precip.max(estimate);
    }

    let (level, flood_type) = if precip > 115.0 || effective_tide > 5.0 {
        (AlertLevel::Critical, "Very Heavy Rainfall Flood")
    } else if precip > 64.0 || effective_tide > 4.5 {
        (AlertLevel::Warning, "Heavy Rainfall Flood")
    } else if precip > 30.0 || effective_tide > 4.0 {
        (AlertLevel::Watch, "Moderate Rainfall Flood Risk")
    } else {
        (AlertLevel::Advisory, "Flood Watch")
    };
    let confidence = if precip > 50.0 { 0.80 } else { 0.70 };

    Some(HazardAlert::new(
        HazardType::CoastalFlood,
        level,
        input.location,
        input.now,
        Duration::hours(EXPIRY_HOURS),
        HazardParameters::CoastalFlood {
            flood_type: flood_type.to_string(),
            precip_mm: precip,
            effective_tide_mt: effective_tide,
            surge_factor,
        },
        confidence,
        "imd_rainfall_bands",
        recommendations(level),
    ))
}

fn recommendations(level: AlertLevel) -> Vec<String> {
    match level {
        AlertLevel::Critical => vec![
            "Move to higher floors or designated relief shelters".to_string(),
            "Do not walk or drive through flood water".to_string(),
            "Switch off electricity supply in inundated premises".to_string(),
        ],
        AlertLevel::Warning => vec![
            "Avoid low-lying roads and underpasses".to_string(),
            "Keep essential supplies and documents ready to move".to_string(),
        ],
        _ => vec![
            "Heavy rain may cause local waterlogging; plan travel accordingly".to_string(),
            "Clear drains around your premises where safe".to_string(),
        ],
    }
}
