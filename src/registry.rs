// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Monitored-location registry
//!
//! The location set is loaded once from configuration and never changes for
//! the lifetime of the process; the registry is a read-only index over it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Broad coastline morphology, used for risk context in alert payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoastlineType {
    Open,
    Estuarine,
    Deltaic,
    Sheltered,
}

/// Static hazard-risk rating for a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Low,
    Moderate,
    High,
    Severe,
}

/// A coastal location under continuous monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredLocation {
    pub id: String,
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub region: String,
    pub coastline_type: CoastlineType,
    pub population: u64,
    pub risk_profile: RiskProfile,
}

/// Read-only lookup over the fixed location set
pub struct LocationRegistry {
    locations: Vec<MonitoredLocation>,
    index: HashMap<String, usize>,
}

impl LocationRegistry {
    pub fn new(locations: Vec<MonitoredLocation>) -> Self {
        let index = locations
            .iter()
            .enumerate()
            .map(|(i, loc)| (loc.id.clone(), i))
            .collect();
        Self { locations, index }
    }

    pub fn list(&self) -> &[MonitoredLocation] {
        &self.locations
    }

    pub fn get(&self, id: &str) -> Option<&MonitoredLocation> {
        self.index.get(id).map(|&i| &self.locations[i])
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
