// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! Active-alert store
//!
//! Holds the currently active alerts per location. `update` first sweeps
//! expired alerts, then inserts new ones under the dedup invariant: at most
//! one active alert per `(location, hazard_type)` pair. First writer wins;
//! an existing alert is preserved, not refreshed, until it expires.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::detection::{AlertLevel, HazardAlert, HazardType};

/// Read-side filter for active alerts
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub location_id: Option<String>,
    pub hazard_type: Option<HazardType>,
    pub min_level: Option<AlertLevel>,
}

#[derive(Default)]
pub struct AlertStore {
    active: RwLock<HashMap<String, Vec<HazardAlert>>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweep expired alerts for the location, then insert each candidate
    /// unless an active alert of the same hazard type already exists.
    /// Returns the alerts that were actually inserted.
    pub async fn update(
        &self,
        location_id: &str,
        candidates: Vec<HazardAlert>,
        now: DateTime<Utc>,
    ) -> Vec<HazardAlert> {
        let mut map = self.active.write().await;
        let slot = map.entry(location_id.to_string()).or_default();
        slot.retain(|alert| !alert.is_expired(now));

        let mut inserted = Vec::new();
        for alert in candidates {
            if slot.iter().any(|active| active.hazard_type == alert.hazard_type) {
                continue;
            }
            slot.push(alert.clone());
            inserted.push(alert);
        }
        inserted
    }

    /// Drop expired alerts everywhere
    pub async fn sweep(&self, now: DateTime<Utc>) {
        let mut map = self.active.write().await;
        for slot in map.values_mut() {
            slot.retain(|alert| !alert.is_expired(now));
        }
        map.retain(|_, slot| !slot.is_empty());
    }

    /// Filtered snapshot of active alerts, most severe first
    pub async fn get_active(&self, filter: &AlertFilter, now: DateTime<Utc>) -> Vec<HazardAlert> {
        let map = self.active.read().await;
        let mut alerts: Vec<HazardAlert> = map
            .iter()
            .filter(|(id, _)| filter.location_id.as_deref().map_or(true, |want| want == id.as_str()))
            .flat_map(|(_, slot)| slot.iter())
            .filter(|alert| !alert.is_expired(now))
            .filter(|alert| filter.hazard_type.map_or(true, |h| h == alert.hazard_type))
            .filter(|alert| filter.min_level.map_or(true, |l| alert.alert_level >= l))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.alert_level.cmp(&a.alert_level));
        alerts
    }

    /// Active alerts for one location, most severe first
    pub async fn active_for_location(&self, location_id: &str, now: DateTime<Utc>) -> Vec<HazardAlert> {
        let filter = AlertFilter {
            location_id: Some(location_id.to_string()),
            ..AlertFilter::default()
        };
        self.get_active(&filter, now).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::detection::test_support::chennai;
    use crate::detection::HazardParameters;

    fn alert(hazard: HazardType, level: AlertLevel, ttl_hours: i64, now: DateTime<Utc>) -> HazardAlert {
        let location = chennai();
        HazardAlert::new(
            hazard,
            level,
            &location,
            now,
            Duration::hours(ttl_hours),
            HazardParameters::RipCurrents {
                sig_ht_mt: 3.0,
                swell_period_secs: 15.0,
            },
            0.7,
            "test",
            vec![format!("{}-{}", hazard.label(), level.label())],
        )
    }

    #[tokio::test]
    async fn duplicate_hazard_type_is_not_inserted() {
        let store = AlertStore::new();
        let now = Utc::now();

        let first = store
            .update("chennai", vec![alert(HazardType::Cyclone, AlertLevel::Warning, 12, now)], now)
            .await;
        assert_eq!(first.len(), 1);

        let second = store
            .update("chennai", vec![alert(HazardType::Cyclone, AlertLevel::Critical, 12, now)], now)
            .await;
        assert!(second.is_empty());

        let active = store.active_for_location("chennai", now).await;
        assert_eq!(active.len(), 1);
        // First writer wins: the original Warning alert survives
        assert_eq!(active[0].alert_level, AlertLevel::Warning);
    }

    #[tokio::test]
    async fn expired_alerts_are_swept_before_insert() {
        let store = AlertStore::new();
        let now = Utc::now();

        store
            .update("chennai", vec![alert(HazardType::Tsunami, AlertLevel::Watch, 6, now)], now)
            .await;

        // Seven hours later the original has expired and a new one may land
        let later = now + Duration::hours(7);
        let inserted = store
            .update("chennai", vec![alert(HazardType::Tsunami, AlertLevel::Advisory, 6, later)], later)
            .await;
        assert_eq!(inserted.len(), 1);

        let active = store.active_for_location("chennai", later).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].alert_level, AlertLevel::Advisory);
    }

    #[tokio::test]
    async fn expired_alerts_never_appear_in_reads() {
        let store = AlertStore::new();
        let now = Utc::now();
        store
            .update("chennai", vec![alert(HazardType::HighWaves, AlertLevel::Watch, 6, now)], now)
            .await;

        let later = now + Duration::hours(7);
        assert!(store.active_for_location("chennai", later).await.is_empty());
        assert!(store.get_active(&AlertFilter::default(), later).await.is_empty());
    }

    #[tokio::test]
    async fn reads_are_level_descending_and_filterable() {
        let store = AlertStore::new();
        let now = Utc::now();
        store
            .update(
                "chennai",
                vec![
                    alert(HazardType::RipCurrents, AlertLevel::Advisory, 6, now),
                    alert(HazardType::Cyclone, AlertLevel::Critical, 12, now),
                    alert(HazardType::HighWaves, AlertLevel::Watch, 6, now),
                ],
                now,
            )
            .await;

        let all = store.get_active(&AlertFilter::default(), now).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].alert_level, AlertLevel::Critical);
        assert_eq!(all[2].alert_level, AlertLevel::Advisory);

        let severe = store
            .get_active(
                &AlertFilter {
                    min_level: Some(AlertLevel::Watch),
                    ..AlertFilter::default()
                },
                now,
            )
            .await;
        assert_eq!(severe.len(), 2);

        let cyclones = store
            .get_active(
                &AlertFilter {
                    hazard_type: Some(HazardType::Cyclone),
                    ..AlertFilter::default()
                },
                now,
            )
            .await;
        assert_eq!(cyclones.len(), 1);
    }

    #[tokio::test]
    async fn dedup_is_per_location() {
        let store = AlertStore::new();
        let now = Utc::now();
        store
            .update("chennai", vec![alert(HazardType::Cyclone, AlertLevel::Warning, 12, now)], now)
            .await;
        let inserted = store
            .update("mumbai", vec![alert(HazardType::Cyclone, AlertLevel::Warning, 12, now)], now)
            .await;
        assert_eq!(inserted.len(), 1);
        assert_eq!(store.get_active(&AlertFilter::default(), now).await.len(), 2);
    }
}
