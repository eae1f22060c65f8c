// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Engine core - cycle results, summaries and engine errors

mod engine;
mod event_bus;

pub use engine::HazardEngine;
pub use event_bus::{EngineEvent, EventBus};

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::HazardAlert;
use crate::status::LocationStatus;
use crate::telemetry::EarthquakeEvent;

/// Outcome of one detection cycle; not persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionCycleResult {
    pub success: bool,
    pub alerts_generated: usize,
    pub locations_processed: usize,
    pub processing_time_ms: u64,
    pub errors: Vec<CycleError>,
}

/// One captured failure within a cycle. `location_id` is `None` for
/// cycle-wide failures such as the shared seismic fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleError {
    pub location_id: Option<String>,
    pub message: String,
}

/// System-wide rollup served alongside the per-location statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiHazardSummary {
    pub total_active_alerts: usize,
    pub alerts_by_level: BTreeMap<String, usize>,
    pub alerts_by_hazard: BTreeMap<String, usize>,
    pub recent_earthquakes: usize,
    pub monitoring_active: bool,
    pub last_cycle: Option<DateTime<Utc>>,
    pub next_cycle: Option<DateTime<Utc>>,
}

/// Full snapshot returned by `HazardEngine::get_all_status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllStatus {
    pub locations: HashMap<String, LocationStatus>,
    pub summary: MultiHazardSummary,
    pub recent_earthquakes: Vec<EarthquakeEvent>,
    pub global_alerts: Vec<HazardAlert>,
}

/// Synchronous engine failures. Telemetry failures never surface here;
/// they are captured per location in `DetectionCycleResult::errors`.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    #[error("monitoring is already running")]
    AlreadyRunning,
    #[error("monitoring is not running")]
    NotRunning,
}
