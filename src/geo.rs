// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Geographic primitives

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point in kilometres (haversine)
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let chennai = Coordinates::new(13.0827, 80.2707);
        assert_eq!(chennai.distance_km(&chennai), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let chennai = Coordinates::new(13.0827, 80.2707);
        let mumbai = Coordinates::new(19.0760, 72.8777);
        let ab = chennai.distance_km(&mumbai);
        let ba = mumbai.distance_km(&chennai);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn chennai_mumbai_distance_is_plausible() {
        let chennai = Coordinates::new(13.0827, 80.2707);
        let mumbai = Coordinates::new(19.0760, 72.8777);
        let km = chennai.distance_km(&mumbai);
        assert!(km > 1000.0 && km < 1070.0, "got {km}");
    }
}
