// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Simulated telemetry for demo/testing
//!
//! Implements both provider traits with randomized but physically plausible
//! readings so the engine runs end-to-end without API keys. Storm and quake
//! probabilities are deliberately high for a demo.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rand::prelude::*;

use super::{
    is_oceanic, EarthquakeEvent, EarthquakeProvider, MarineParams, TelemetryError, WeatherParams,
    WeatherProvider,
};
use crate::geo::Coordinates;

const CALM_CONDITIONS: &[&str] = &["Clear", "Sunny", "Partly cloudy", "Mist"];
const STORM_CONDITIONS: &[&str] = &[
    "Thundery outbreaks possible",
    "Moderate or heavy rain with thunder",
    "Heavy rain",
    "Torrential rain shower",
];

pub struct SimulatedTelemetry {
    rng: Mutex<StdRng>,
    storm_probability: f64,
    quake_probability: f64,
}

impl SimulatedTelemetry {
    pub fn new() -> Self {
        Self::with_probabilities(0.25, 0.10)
    }

    pub fn with_probabilities(storm_probability: f64, quake_probability: f64) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            storm_probability,
            quake_probability,
        }
    }
}

impl Default for SimulatedTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for SimulatedTelemetry {
    async fn fetch(&self, _coords: &Coordinates) -> Result<(WeatherParams, MarineParams), TelemetryError> {
        let mut rng = self.rng.lock().expect("simulator rng poisoned");
        let now = Utc::now();
        let stormy = rng.gen_bool(self.storm_probability);

        let (wind_kph, pressure_mb, precip_mm, humidity, condition) = if stormy {
            (
                rng.gen_range(55.0..170.0),
                rng.gen_range(955.0..998.0),
                rng.gen_range(15.0..130.0),
                rng.gen_range(82.0..98.0),
                *STORM_CONDITIONS.choose(&mut *rng).unwrap(),
            )
        } else {
            (
                rng.gen_range(5.0..28.0),
                rng.gen_range(1006.0..1018.0),
                rng.gen_range(0.0..4.0),
                rng.gen_range(55.0..80.0),
                *CALM_CONDITIONS.choose(&mut *rng).unwrap(),
            )
        };

        let weather = WeatherParams {
            wind_kph,
            wind_dir_deg: rng.gen_range(0.0..360.0),
            gust_kph: wind_kph * rng.gen_range(1.1..1.5),
            pressure_mb,
            humidity,
            precip_mm,
            visibility_km: if stormy { rng.gen_range(1.0..6.0) } else { rng.gen_range(8.0..10.0) },
            condition: condition.to_string(),
            timestamp: now,
        };

        // Sea state loosely tracks the wind
        let sig_ht = (wind_kph / 22.0 + rng.gen_range(-0.3..0.6)).max(0.1);
        let marine = MarineParams {
            sig_ht_mt: Some(sig_ht),
            swell_ht_mt: Some((sig_ht * rng.gen_range(0.5..0.9)).max(0.1)),
            swell_period_secs: Some(rng.gen_range(6.0..18.0)),
            tide_height_mt: Some(rng.gen_range(0.3..2.2)),
            water_temp_c: Some(rng.gen_range(26.0..30.0)),
            timestamp: now,
        };

        Ok((weather, marine))
    }
}

#[async_trait]
impl EarthquakeProvider for SimulatedTelemetry {
    async fn fetch_recent(&self) -> Result<Vec<EarthquakeEvent>, TelemetryError> {
        let mut rng = self.rng.lock().expect("simulator rng poisoned");
        if !rng.gen_bool(self.quake_probability) {
            return Ok(Vec::new());
        }

        // Somewhere along the Sunda-Andaman arc
        let coordinates = Coordinates::new(rng.gen_range(2.0..14.0), rng.gen_range(90.0..98.0));
        Ok(vec![EarthquakeEvent {
            id: format!("sim{}", rng.gen_range(100_000..999_999)),
            magnitude: rng.gen_range(6.5..8.6),
            depth_km: rng.gen_range(5.0..60.0),
            is_oceanic: is_oceanic(&coordinates),
            coordinates,
            description: "Simulated event, Andaman arc".to_string(),
            timestamp: Utc::now(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_weather_is_well_formed() {
        let sim = SimulatedTelemetry::with_probabilities(1.0, 1.0);
        let (weather, marine) = sim.fetch(&Coordinates::new(13.0827, 80.2707)).await.unwrap();
        assert!(weather.wind_kph > 0.0);
        assert!(weather.pressure_mb < 1000.0);
        assert!(marine.sig_ht_mt.unwrap() > 0.0);
    }

    #[tokio::test]
    async fn simulated_quakes_are_oceanic() {
        let sim = SimulatedTelemetry::with_probabilities(0.0, 1.0);
        let events = sim.fetch_recent().await.unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_oceanic);
        assert!(events[0].magnitude >= 6.5);
    }
}
