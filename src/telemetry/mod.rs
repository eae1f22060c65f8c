// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Telemetry contracts and snapshot types
//!
//! The engine consumes two external feeds: a weather/marine provider and a
//! public seismic-event feed. Both are modelled as async traits with typed
//! errors so a single failed fetch never takes down a detection cycle.

mod earthquake;
mod simulator;
mod weather;

pub use earthquake::{is_oceanic, UsgsEarthquakeClient};
pub use simulator::SimulatedTelemetry;
pub use weather::WeatherApiClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinates;

/// One surface-weather snapshot for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherParams {
    pub wind_kph: f64,
    pub wind_dir_deg: f64,
    pub gust_kph: f64,
    pub pressure_mb: f64,
    pub humidity: f64,
    pub precip_mm: f64,
    pub visibility_km: f64,
    pub condition: String,
    pub timestamp: DateTime<Utc>,
}

/// One marine snapshot; fields are individually optional because many
/// providers have no marine coverage for sheltered or inland-adjacent
/// stations. Detectors fall back to wind-derived proxies where sensible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarineParams {
    pub sig_ht_mt: Option<f64>,
    pub swell_ht_mt: Option<f64>,
    pub swell_period_secs: Option<f64>,
    pub tide_height_mt: Option<f64>,
    pub water_temp_c: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl MarineParams {
    /// A snapshot with no marine readings at all
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            sig_ht_mt: None,
            swell_ht_mt: None,
            swell_period_secs: None,
            tide_height_mt: None,
            water_temp_c: None,
            timestamp,
        }
    }
}

/// A seismic event from the shared feed, fetched once per cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    pub id: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub coordinates: Coordinates,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub is_oceanic: bool,
}

/// Failure modes of the external feeds
#[derive(Debug, Clone, Error)]
pub enum TelemetryError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TelemetryError::Timeout
        } else if err.is_decode() {
            TelemetryError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            TelemetryError::Status(status.as_u16())
        } else {
            TelemetryError::Network(err.to_string())
        }
    }
}

/// Weather/marine provider contract
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current weather and marine snapshot for a point. The
    /// implementation must bound the request with an explicit timeout.
    async fn fetch(&self, coords: &Coordinates) -> Result<(WeatherParams, MarineParams), TelemetryError>;
}

/// Seismic-event feed contract
#[async_trait]
pub trait EarthquakeProvider: Send + Sync {
    /// Fetch recent events within the provider's configured window
    async fn fetch_recent(&self) -> Result<Vec<EarthquakeEvent>, TelemetryError>;
}
