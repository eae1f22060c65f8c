// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! HTTP weather/marine provider
//!
//! Talks to a WeatherAPI-style service: `current.json` for surface weather
//! and `marine.json` for wave, swell and tide data. Marine coverage is
//! spotty, so a failed or empty marine response degrades to an empty
//! `MarineParams` instead of failing the whole fetch.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MarineParams, TelemetryError, WeatherParams, WeatherProvider};
use crate::config::TelemetryConfig;
use crate::geo::Coordinates;

pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// ============================================================================
// Wire structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentWire,
}

#[derive(Debug, Deserialize)]
struct CurrentWire {
    wind_kph: f64,
    #[serde(default)]
    wind_degree: f64,
    #[serde(default)]
    gust_kph: f64,
    pressure_mb: f64,
    humidity: f64,
    precip_mm: f64,
    #[serde(default)]
    vis_km: f64,
    condition: ConditionWire,
}

#[derive(Debug, Deserialize)]
struct ConditionWire {
    text: String,
}

#[derive(Debug, Deserialize)]
struct MarineResponse {
    forecast: ForecastWire,
}

#[derive(Debug, Deserialize)]
struct ForecastWire {
    #[serde(default)]
    forecastday: Vec<ForecastDayWire>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayWire {
    #[serde(default)]
    hour: Vec<MarineHourWire>,
    #[serde(default)]
    day: Option<DayWire>,
}

#[derive(Debug, Deserialize)]
struct MarineHourWire {
    time_epoch: i64,
    sig_ht_mt: Option<f64>,
    swell_ht_mt: Option<f64>,
    swell_period_secs: Option<f64>,
    water_temp_c: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DayWire {
    #[serde(default)]
    tides: Vec<TidesWire>,
}

#[derive(Debug, Deserialize)]
struct TidesWire {
    #[serde(default)]
    tide: Vec<TideWire>,
}

#[derive(Debug, Deserialize)]
struct TideWire {
    // The provider serialises tide height as a string, e.g. "1.17"
    tide_height_mt: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

impl WeatherApiClient {
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.weather_base_url.trim_end_matches('/').to_string(),
            api_key: config.weather_api_key.clone(),
        })
    }

    async fn fetch_current(&self, coords: &Coordinates) -> Result<WeatherParams, TelemetryError> {
        let url = format!(
            "{}/current.json?key={}&q={},{}",
            self.base_url, self.api_key, coords.lat, coords.lon
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TelemetryError::Status(response.status().as_u16()));
        }

        let wire: CurrentResponse = response.json().await?;
        Ok(WeatherParams {
            wind_kph: wire.current.wind_kph,
            wind_dir_deg: wire.current.wind_degree,
            gust_kph: wire.current.gust_kph,
            pressure_mb: wire.current.pressure_mb,
            humidity: wire.current.humidity,
            precip_mm: wire.current.precip_mm,
            visibility_km: wire.current.vis_km,
            condition: wire.current.condition.text,
            timestamp: Utc::now(),
        })
    }

    async fn fetch_marine(&self, coords: &Coordinates) -> Result<MarineParams, TelemetryError> {
        let url = format!(
            "{}/marine.json?key={}&q={},{}&days=1",
            self.base_url, self.api_key, coords.lat, coords.lon
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TelemetryError::Status(response.status().as_u16()));
        }

        let wire: MarineResponse = response.json().await?;
        let now = Utc::now();

        let day = wire
            .forecast
            .forecastday
            .into_iter()
            .next()
            .ok_or_else(|| TelemetryError::Parse("marine forecast has no days".to_string()))?;

        // The feed is hourly; take the hour closest to now.
        let hour = day
            .hour
            .into_iter()
            .min_by_key(|h| (h.time_epoch - now.timestamp()).abs());

        let tide_height_mt = day
            .day
            .iter()
            .flat_map(|d| d.tides.iter())
            .flat_map(|t| t.tide.iter())
            .find_map(|t| t.tide_height_mt.as_deref().and_then(|s| s.parse::<f64>().ok()));

        let mut marine = MarineParams::empty(now);
        marine.tide_height_mt = tide_height_mt;
        if let Some(hour) = hour {
            marine.sig_ht_mt = hour.sig_ht_mt;
            marine.swell_ht_mt = hour.swell_ht_mt;
            marine.swell_period_secs = hour.swell_period_secs;
            marine.water_temp_c = hour.water_temp_c;
            marine.timestamp = Utc.timestamp_opt(hour.time_epoch, 0).single().unwrap_or(now);
        }
        Ok(marine)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn fetch(&self, coords: &Coordinates) -> Result<(WeatherParams, MarineParams), TelemetryError> {
        let weather = self.fetch_current(coords).await?;

        let marine = match self.fetch_marine(coords).await {
            Ok(marine) => marine,
            Err(err) => {
                // Detectors carry wind-derived fallbacks for exactly this case.
                warn!(lat = coords.lat, lon = coords.lon, "marine fetch failed: {err}");
                MarineParams::empty(weather.timestamp)
            }
        };

        debug!(
            lat = coords.lat,
            lon = coords.lon,
            wind_kph = weather.wind_kph,
            pressure_mb = weather.pressure_mb,
            "weather snapshot fetched"
        );
        Ok((weather, marine))
    }
}
