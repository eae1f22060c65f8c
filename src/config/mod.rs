// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Configuration module
//!
//! Everything tunable lives here: engine timing, telemetry endpoints,
//! detector thresholds and the monitored-location set. The loaded `Config`
//! is injected into the engine constructor; nothing reads process globals.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::geo::Coordinates;
use crate::registry::{CoastlineType, MonitoredLocation, RiskProfile};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level
    pub log_level: String,

    /// Use simulated telemetry instead of live providers
    pub demo_mode: bool,

    /// Engine tuning
    pub engine: EngineConfig,

    /// External feed endpoints and timeouts
    pub telemetry: TelemetryConfig,

    /// Detector qualification thresholds
    pub thresholds: Thresholds,

    /// Monitored coastal locations (fixed for the process lifetime)
    pub locations: Vec<MonitoredLocation>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            demo_mode: true,
            engine: EngineConfig::default(),
            telemetry: TelemetryConfig::default(),
            thresholds: Thresholds::default(),
            locations: default_locations(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Default configuration path
    pub fn default_path() -> PathBuf {
        PathBuf::from("./config/coastwatch.toml")
    }
}

/// Engine tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Detection cycle interval in seconds
    pub interval_secs: u64,

    /// Maximum concurrent per-location tasks within a cycle
    pub concurrency: usize,

    /// How long `stop()` waits for the monitoring loop to unwind
    pub stop_timeout_secs: u64,

    /// Event-bus channel capacity
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            concurrency: 8,
            stop_timeout_secs: 10,
            event_capacity: 256,
        }
    }
}

/// External feed endpoints and timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Weather provider base URL (WeatherAPI-style)
    pub weather_base_url: String,

    /// Weather provider API key
    pub weather_api_key: String,

    /// Seismic GeoJSON feed URL (public, no auth)
    pub earthquake_feed_url: String,

    /// Only consider seismic events within this window
    pub earthquake_window_hours: u64,

    /// Per-request timeout in seconds for both feeds
    pub timeout_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            weather_base_url: "https://api.weatherapi.com/v1".to_string(),
            weather_api_key: String::new(),
            earthquake_feed_url:
                "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson".to_string(),
            earthquake_window_hours: 24,
            timeout_secs: 15,
        }
    }
}

/// Detector qualification thresholds. Classification bands (the IMD wind
/// and rainfall scales) are meteorological standards and live as constants
/// in the detector modules; only the qualification gates are tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub tsunami: TsunamiThresholds,
    pub cyclone: CycloneThresholds,
    pub high_waves: HighWaveThresholds,
    pub coastal_flood: CoastalFloodThresholds,
    pub rip_currents: RipCurrentThresholds,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            tsunami: TsunamiThresholds::default(),
            cyclone: CycloneThresholds::default(),
            high_waves: HighWaveThresholds::default(),
            coastal_flood: CoastalFloodThresholds::default(),
            rip_currents: RipCurrentThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TsunamiThresholds {
    pub min_magnitude: f64,
    pub max_depth_km: f64,
    pub max_distance_km: f64,
}

impl Default for TsunamiThresholds {
    fn default() -> Self {
        Self {
            min_magnitude: 6.5,
            max_depth_km: 70.0,
            max_distance_km: 3000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycloneThresholds {
    pub min_wind_kph: f64,
    pub low_pressure_mb: f64,
}

impl Default for CycloneThresholds {
    fn default() -> Self {
        Self {
            min_wind_kph: 50.0,
            low_pressure_mb: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighWaveThresholds {
    pub sig_height_mt: f64,
    pub swell_height_mt: f64,
}

impl Default for HighWaveThresholds {
    fn default() -> Self {
        Self {
            sig_height_mt: 4.0,
            swell_height_mt: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoastalFloodThresholds {
    pub heavy_rain_mm: f64,
    pub tidal_surge_mt: f64,
}

impl Default for CoastalFloodThresholds {
    fn default() -> Self {
        Self {
            heavy_rain_mm: 30.0,
            tidal_surge_mt: 3.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RipCurrentThresholds {
    pub swell_period_secs: f64,
    pub sig_height_mt: f64,
}

impl Default for RipCurrentThresholds {
    fn default() -> Self {
        Self {
            swell_period_secs: 14.0,
            sig_height_mt: 2.5,
        }
    }
}

/// The built-in monitoring set: major Indian coastal stations across the
/// Bay of Bengal, Arabian Sea and Andaman Sea.
pub fn default_locations() -> Vec<MonitoredLocation> {
    fn loc(
        id: &str,
        name: &str,
        lat: f64,
        lon: f64,
        region: &str,
        coastline_type: CoastlineType,
        population: u64,
        risk_profile: RiskProfile,
    ) -> MonitoredLocation {
        MonitoredLocation {
            id: id.to_string(),
            name: name.to_string(),
            country: "India".to_string(),
            coordinates: Coordinates::new(lat, lon),
            region: region.to_string(),
            coastline_type,
            population,
            risk_profile,
        }
    }

    vec![
        loc("chennai", "Chennai", 13.0827, 80.2707, "Bay of Bengal", CoastlineType::Open, 7_088_000, RiskProfile::High),
        loc("mumbai", "Mumbai", 19.0760, 72.8777, "Arabian Sea", CoastlineType::Estuarine, 12_478_000, RiskProfile::High),
        loc("kolkata", "Kolkata", 22.5726, 88.3639, "Bay of Bengal", CoastlineType::Deltaic, 4_496_000, RiskProfile::Severe),
        loc("visakhapatnam", "Visakhapatnam", 17.6868, 83.2185, "Bay of Bengal", CoastlineType::Open, 2_035_000, RiskProfile::High),
        loc("kochi", "Kochi", 9.9312, 76.2673, "Arabian Sea", CoastlineType::Estuarine, 677_000, RiskProfile::Moderate),
        loc("paradip", "Paradip", 20.3165, 86.6085, "Bay of Bengal", CoastlineType::Deltaic, 68_000, RiskProfile::Severe),
        loc("puducherry", "Puducherry", 11.9416, 79.8083, "Bay of Bengal", CoastlineType::Open, 244_000, RiskProfile::Moderate),
        loc("panaji", "Panaji", 15.4909, 73.8278, "Arabian Sea", CoastlineType::Sheltered, 114_000, RiskProfile::Low),
        loc("mangalore", "Mangalore", 12.9141, 74.8560, "Arabian Sea", CoastlineType::Open, 623_000, RiskProfile::Moderate),
        loc("port-blair", "Port Blair", 11.6234, 92.7265, "Andaman Sea", CoastlineType::Sheltered, 100_000, RiskProfile::Severe),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_calibrated_gates() {
        let config = Config::default();
        assert_eq!(config.thresholds.tsunami.min_magnitude, 6.5);
        assert_eq!(config.thresholds.cyclone.min_wind_kph, 50.0);
        assert_eq!(config.engine.concurrency, 8);
        assert!(!config.locations.is_empty());
    }

    #[test]
    fn default_location_ids_are_unique() {
        let locations = default_locations();
        let mut ids: Vec<_> = locations.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), locations.len());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.locations.len(), config.locations.len());
        assert_eq!(back.telemetry.timeout_secs, config.telemetry.timeout_secs);
    }
}
