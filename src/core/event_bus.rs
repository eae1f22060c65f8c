// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Event bus for downstream consumers
//!
//! The engine publishes raised alerts and completed cycles on a broadcast
//! channel so downstream consumers can subscribe without coupling to
//! engine internals. Publishing never blocks; slow subscribers lag.

use tokio::sync::broadcast;

use super::DetectionCycleResult;
use crate::detection::HazardAlert;

#[derive(Debug, Clone)]
pub enum EngineEvent {
    AlertRaised(HazardAlert),
    CycleCompleted(DetectionCycleResult),
}

pub struct EventBus {
    tx: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish_alert(&self, alert: HazardAlert) {
        let _ = self.tx.send(EngineEvent::AlertRaised(alert));
    }

    pub fn publish_cycle(&self, result: DetectionCycleResult) {
        let _ = self.tx.send(EngineEvent::CycleCompleted(result));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
