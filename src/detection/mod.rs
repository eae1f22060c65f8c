//! Hazard detection - alert model and classifier dispatch
//!
//! Each hazard class has its own pure classifier module; this module owns
//! the shared alert model and runs all five classifiers over one telemetry
//! snapshot. A panicking classifier is isolated at the dispatch boundary
//! and treated as "no alert" for that hazard type only.

pub mod coastal_flood;
pub mod cyclone;
pub mod high_waves;
pub mod rip_currents;
pub mod tsunami;

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Thresholds;
use crate::geo::Coordinates;
use crate::registry::MonitoredLocation;
use crate::telemetry::{EarthquakeEvent, MarineParams, WeatherParams};

/// The five monitored hazard classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Tsunami,
    Cyclone,
    HighWaves,
    CoastalFlood,
    RipCurrents,
}

impl HazardType {
    pub const ALL: [HazardType; 5] = [
        HazardType::Tsunami,
        HazardType::Cyclone,
        HazardType::HighWaves,
        HazardType::CoastalFlood,
        HazardType::RipCurrents,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HazardType::Tsunami => "tsunami",
            HazardType::Cyclone => "cyclone",
            HazardType::HighWaves => "high_waves",
            HazardType::CoastalFlood => "coastal_flood",
            HazardType::RipCurrents => "rip_currents",
        }
    }
}

/// Ordered alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Normal,
    Advisory,
    Watch,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Advisory => "advisory",
            AlertLevel::Watch => "watch",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

/// Per-hazard structured parameters attached to an alert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "hazard", rename_all = "snake_case")]
pub enum HazardParameters {
    Tsunami {
        magnitude: f64,
        depth_km: f64,
        distance_km: f64,
        epicenter: Coordinates,
        event_id: String,
    },
    Cyclone {
        imd_category: String,
        wind_kph: f64,
        gust_kph: f64,
        pressure_mb: f64,
    },
    HighWaves {
        effective_height_mt: f64,
        swell_ht_mt: f64,
        swell_period_secs: f64,
    },
    CoastalFlood {
        flood_type: String,
        precip_mm: f64,
        effective_tide_mt: f64,
        surge_factor: f64,
    },
    RipCurrents {
        sig_ht_mt: f64,
        swell_period_secs: f64,
    },
}

/// A single active hazard alert. Immutable after creation; the store drops
/// it once `expires_at` passes, it is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardAlert {
    pub id: String,
    pub hazard_type: HazardType,
    pub alert_level: AlertLevel,
    pub location_id: String,
    pub detected_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub parameters: HazardParameters,
    pub confidence: f64,
    pub detection_method: String,
    pub recommendations: Vec<String>,
    pub affected_population: u64,
}

impl HazardAlert {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        hazard_type: HazardType,
        alert_level: AlertLevel,
        location: &MonitoredLocation,
        detected_at: DateTime<Utc>,
        ttl: Duration,
        parameters: HazardParameters,
        confidence: f64,
        detection_method: &str,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            hazard_type,
            alert_level,
            location_id: location.id.clone(),
            detected_at,
            expires_at: detected_at + ttl,
            parameters,
            confidence,
            detection_method: detection_method.to_string(),
            recommendations,
            affected_population: location.population,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Everything a classifier may look at for one location in one cycle.
/// `now` is threaded in so classifiers stay deterministic given inputs.
pub struct DetectorInput<'a> {
    pub location: &'a MonitoredLocation,
    pub weather: &'a WeatherParams,
    pub marine: &'a MarineParams,
    pub earthquakes: &'a [EarthquakeEvent],
    pub thresholds: &'a Thresholds,
    pub now: DateTime<Utc>,
}

type Detector = fn(&DetectorInput<'_>) -> Option<HazardAlert>;

const DETECTORS: [(HazardType, Detector); 5] = [
    (HazardType::Tsunami, tsunami::detect),
    (HazardType::Cyclone, cyclone::detect),
    (HazardType::HighWaves, high_waves::detect),
    (HazardType::CoastalFlood, coastal_flood::detect),
    (HazardType::RipCurrents, rip_currents::detect),
];

/// Run all five classifiers over one snapshot, yielding zero-or-one alert
/// per hazard type.
pub fn run_detectors(input: &DetectorInput<'_>) -> Vec<HazardAlert> {
    let mut alerts = Vec::new();
    for (hazard, detect) in DETECTORS {
        match catch_unwind(AssertUnwindSafe(|| detect(input))) {
            Ok(Some(alert)) => alerts.push(alert),
            Ok(None) => {}
            Err(_) => {
                warn!(
                    hazard = hazard.label(),
                    location = %input.location.id,
                    "classifier panicked; treating as no alert"
                );
            }
        }
    }
    alerts
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use super::*;
    use crate::registry::{CoastlineType, RiskProfile};

    pub fn location(id: &str, lat: f64, lon: f64) -> MonitoredLocation {
        MonitoredLocation {
            id: id.to_string(),
            name: id.to_uppercase(),
            country: "India".to_string(),
            coordinates: Coordinates::new(lat, lon),
            region: "Bay of Bengal".to_string(),
            coastline_type: CoastlineType::Open,
            population: 1_500_000,
            risk_profile: RiskProfile::High,
        }
    }

    pub fn chennai() -> MonitoredLocation {
        location("chennai", 13.0827, 80.2707)
    }

    pub fn calm_weather() -> WeatherParams {
        WeatherParams {
            wind_kph: 10.0,
            wind_dir_deg: 180.0,
            gust_kph: 14.0,
            pressure_mb: 1012.0,
            humidity: 65.0,
            precip_mm: 0.0,
            visibility_km: 10.0,
            condition: "Clear".to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn no_marine() -> MarineParams {
        MarineParams::empty(Utc::now())
    }

    pub fn quake(magnitude: f64, depth_km: f64, lat: f64, lon: f64, oceanic: bool) -> EarthquakeEvent {
        EarthquakeEvent {
            id: "test-quake".to_string(),
            magnitude,
            depth_km,
            coordinates: Coordinates::new(lat, lon),
            description: "test event".to_string(),
            timestamp: Utc::now(),
            is_oceanic: oceanic,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::test_support::*;
    use super::*;

    #[test]
    fn alert_levels_are_totally_ordered() {
        assert!(AlertLevel::Normal < AlertLevel::Advisory);
        assert!(AlertLevel::Advisory < AlertLevel::Watch);
        assert!(AlertLevel::Watch < AlertLevel::Warning);
        assert!(AlertLevel::Warning < AlertLevel::Critical);
    }

    #[test]
    fn calm_conditions_produce_no_alerts() {
        let location = chennai();
        let weather = calm_weather();
        let marine = no_marine();
        let thresholds = Thresholds::default();
        let input = DetectorInput {
            location: &location,
            weather: &weather,
            marine: &marine,
            earthquakes: &[],
            thresholds: &thresholds,
            now: Utc::now(),
        };
        assert!(run_detectors(&input).is_empty());
    }

    #[test]
    fn expiry_is_strictly_after_expires_at() {
        let location = chennai();
        let now = Utc::now();
        let alert = HazardAlert::new(
            HazardType::Cyclone,
            AlertLevel::Watch,
            &location,
            now,
            chrono::Duration::hours(12),
            HazardParameters::Cyclone {
                imd_category: "Cyclonic Storm".to_string(),
                wind_kph: 70.0,
                gust_kph: 90.0,
                pressure_mb: 990.0,
            },
            0.85,
            "imd_classification",
            vec![],
        );
        assert!(alert.expires_at >= alert.detected_at);
        assert!(!alert.is_expired(alert.expires_at));
        assert!(alert.is_expired(alert.expires_at + chrono::Duration::seconds(1)));
    }
}
