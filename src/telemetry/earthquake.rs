// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Seismic-event feed client
//!
//! Pulls a public USGS-style GeoJSON summary feed (no auth) and maps its
//! features to `EarthquakeEvent`s. Oceanic classification is computed
//! locally from a fixed bounding box approximating the Indian Ocean basin
//! (Arabian Sea, Bay of Bengal and the Andaman arc included).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{EarthquakeEvent, EarthquakeProvider, TelemetryError};
use crate::config::TelemetryConfig;
use crate::geo::Coordinates;

// Indian Ocean basin bounding box for the oceanic heuristic
const OCEANIC_LAT_RANGE: (f64, f64) = (-40.0, 25.0);
const OCEANIC_LON_RANGE: (f64, f64) = (40.0, 110.0);

/// True when the epicenter falls inside the Indian Ocean basin box
pub fn is_oceanic(coords: &Coordinates) -> bool {
    coords.lat >= OCEANIC_LAT_RANGE.0
        && coords.lat <= OCEANIC_LAT_RANGE.1
        && coords.lon >= OCEANIC_LON_RANGE.0
        && coords.lon <= OCEANIC_LON_RANGE.1
}

pub struct UsgsEarthquakeClient {
    client: reqwest::Client,
    feed_url: String,
    window: chrono::Duration,
}

// ============================================================================
// GeoJSON wire structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeedWire {
    #[serde(default)]
    features: Vec<FeatureWire>,
}

#[derive(Debug, Deserialize)]
struct FeatureWire {
    id: String,
    properties: PropertiesWire,
    geometry: GeometryWire,
}

#[derive(Debug, Deserialize)]
struct PropertiesWire {
    mag: Option<f64>,
    place: Option<String>,
    /// Milliseconds since the Unix epoch
    time: i64,
}

#[derive(Debug, Deserialize)]
struct GeometryWire {
    /// `[lon, lat, depth_km]`
    coordinates: Vec<f64>,
}

// ============================================================================
// Client
// ============================================================================

impl UsgsEarthquakeClient {
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            feed_url: config.earthquake_feed_url.clone(),
            window: chrono::Duration::hours(config.earthquake_window_hours as i64),
        })
    }

    fn map_feature(feature: FeatureWire) -> Option<EarthquakeEvent> {
        let magnitude = feature.properties.mag?;
        if feature.geometry.coordinates.len() < 3 {
            return None;
        }
        let coordinates = Coordinates::new(feature.geometry.coordinates[1], feature.geometry.coordinates[0]);
        let timestamp = Utc.timestamp_millis_opt(feature.properties.time).single()?;

        Some(EarthquakeEvent {
            id: feature.id,
            magnitude,
            depth_km: feature.geometry.coordinates[2],
            is_oceanic: is_oceanic(&coordinates),
            coordinates,
            description: feature.properties.place.unwrap_or_default(),
            timestamp,
        })
    }
}

#[async_trait]
impl EarthquakeProvider for UsgsEarthquakeClient {
    async fn fetch_recent(&self) -> Result<Vec<EarthquakeEvent>, TelemetryError> {
        let response = self.client.get(&self.feed_url).send().await?;
        if !response.status().is_success() {
            return Err(TelemetryError::Status(response.status().as_u16()));
        }

        let wire: FeedWire = response.json().await?;
        let cutoff = Utc::now() - self.window;

        let events: Vec<EarthquakeEvent> = wire
            .features
            .into_iter()
            .filter_map(Self::map_feature)
            .filter(|event| event.timestamp >= cutoff)
            .collect();

        debug!(count = events.len(), "seismic feed fetched");
        Ok(events)
    }
}
