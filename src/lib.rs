// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! CoastWatch - Coastal Multi-Hazard Detection Engine
//!
//! Monitors a fixed set of coastal locations for five classes of ocean
//! hazard - tsunami, cyclone, high waves, coastal flooding and rip
//! currents - by periodically pulling weather/marine telemetry and a shared
//! seismic feed, applying calibrated threshold rules and maintaining a live
//! alert state per location.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       HazardEngine                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────┐   ┌───────────┐              │
//! │  │ Telemetry │ → │ Detection  │ → │  Alert    │              │
//! │  │ Providers │   │ (5 rules)  │   │  Store    │              │
//! │  └───────────┘   └────────────┘   └───────────┘              │
//! │        ↑               │               │                     │
//! │  ┌───────────┐   ┌────────────┐   ┌───────────┐              │
//! │  │ Location  │   │  Status    │   │  Event    │              │
//! │  │ Registry  │   │ Aggregator │   │   Bus     │              │
//! │  └───────────┘   └────────────┘   └───────────┘              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is constructed once by the process entry point with its
//! configuration and telemetry providers injected, and exposes a read-only
//! query surface for callers.

#![allow(dead_code)]

pub mod alerts;
pub mod config;
pub mod core;
pub mod detection;
pub mod geo;
pub mod registry;
pub mod status;
pub mod telemetry;

// Re-exports for convenience
pub use alerts::{AlertFilter, AlertStore};
pub use config::Config;
pub use crate::core::{DetectionCycleResult, EngineError, EngineEvent, HazardEngine};
pub use detection::{AlertLevel, HazardAlert, HazardType};
pub use geo::Coordinates;
pub use registry::{LocationRegistry, MonitoredLocation};
pub use status::LocationStatus;
pub use telemetry::{EarthquakeProvider, WeatherProvider};

/// CoastWatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CoastWatch name
pub const NAME: &str = "CoastWatch";
