//! Multi-hazard engine - scheduling, fan-out and the query surface
//!
//! One `HazardEngine` is constructed by the process entry point with its
//! configuration and telemetry providers injected. `start` spawns the
//! background cycle driver; `run_cycle` can also be called directly. The
//! alert store and status map are written only by cycles (single writer)
//! and read by the query methods.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::{AllStatus, CycleError, DetectionCycleResult, EngineError, EventBus, MultiHazardSummary};
use crate::alerts::{AlertFilter, AlertStore};
use crate::config::Config;
use crate::detection::{run_detectors, DetectorInput, HazardAlert};
use crate::registry::{LocationRegistry, MonitoredLocation};
use crate::status::{self, LocationStatus};
use crate::telemetry::{EarthquakeEvent, EarthquakeProvider, TelemetryError, WeatherProvider};

/// Handle on the running background driver
struct Monitor {
    shutdown: broadcast::Sender<()>,
    handle: JoinHandle<()>,
    interval_secs: u64,
}

pub struct HazardEngine {
    config: Arc<Config>,
    registry: LocationRegistry,
    weather: Arc<dyn WeatherProvider>,
    earthquakes: Arc<dyn EarthquakeProvider>,
    store: AlertStore,
    statuses: RwLock<HashMap<String, LocationStatus>>,
    recent_quakes: RwLock<Vec<EarthquakeEvent>>,
    last_cycle: RwLock<Option<DateTime<Utc>>>,
    monitor: Mutex<Option<Monitor>>,
    events: EventBus,
}

impl HazardEngine {
    pub fn new(
        config: Config,
        weather: Arc<dyn WeatherProvider>,
        earthquakes: Arc<dyn EarthquakeProvider>,
    ) -> Self {
        let registry = LocationRegistry::new(config.locations.clone());
        let events = EventBus::new(config.engine.event_capacity);
        Self {
            config: Arc::new(config),
            registry,
            weather,
            earthquakes,
            store: AlertStore::new(),
            statuses: RwLock::new(HashMap::new()),
            recent_quakes: RwLock::new(Vec::new()),
            last_cycle: RwLock::new(None),
            monitor: Mutex::new(None),
            events,
        }
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Spawn the background cycle driver. The first cycle runs immediately.
    pub async fn start(self: &Arc<Self>, interval_secs: u64) -> Result<(), EngineError> {
        let mut guard = self.monitor.lock().await;
        if guard.is_some() {
            return Err(EngineError::AlreadyRunning);
        }

        let (shutdown, mut shutdown_rx) = broadcast::channel(1);
        let engine = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // A failed cycle must never kill the loop
                        match engine.run_cycle(None).await {
                            Ok(result) => debug!(
                                alerts = result.alerts_generated,
                                locations = result.locations_processed,
                                errors = result.errors.len(),
                                elapsed_ms = result.processing_time_ms,
                                "detection cycle complete"
                            ),
                            Err(err) => error!("detection cycle failed: {err}"),
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("monitoring loop shutting down");
                        break;
                    }
                }
            }
        });

        *guard = Some(Monitor {
            shutdown,
            handle,
            interval_secs,
        });
        info!(interval_secs, "hazard monitoring started");
        Ok(())
    }

    /// Signal the driver to stop and wait for it to unwind, bounded by the
    /// configured stop timeout. In-flight work past the bound is aborted.
    pub async fn stop(&self) -> Result<(), EngineError> {
        let mut monitor = self
            .monitor
            .lock()
            .await
            .take()
            .ok_or(EngineError::NotRunning)?;

        let _ = monitor.shutdown.send(());
        let bound = Duration::from_secs(self.config.engine.stop_timeout_secs);
        if tokio::time::timeout(bound, &mut monitor.handle).await.is_err() {
            warn!("monitoring loop did not unwind within {:?}; aborting", bound);
            monitor.handle.abort();
        }
        info!("hazard monitoring stopped");
        Ok(())
    }

    pub async fn monitoring_active(&self) -> bool {
        self.monitor.lock().await.is_some()
    }

    /// Run one detection cycle over all locations, or a filtered subset.
    /// Unknown ids in the filter fail synchronously before any fetching.
    pub async fn run_cycle(
        &self,
        location_ids: Option<&[String]>,
    ) -> Result<DetectionCycleResult, EngineError> {
        let started = Instant::now();
        let cycle_time = Utc::now();

        let targets: Vec<MonitoredLocation> = match location_ids {
            Some(ids) => ids
                .iter()
                .map(|id| {
                    self.registry
                        .get(id)
                        .cloned()
                        .ok_or_else(|| EngineError::UnknownLocation(id.clone()))
                })
                .collect::<Result<_, _>>()?,
            None => self.registry.list().to_vec(),
        };

        let mut errors: Vec<CycleError> = Vec::new();

        // One shared seismic fetch per cycle; failure degrades to an empty
        // event list rather than aborting the cycle.
        let quakes = match self.earthquakes.fetch_recent().await {
            Ok(quakes) => {
                *self.recent_quakes.write().await = quakes.clone();
                quakes
            }
            Err(err) => {
                warn!("seismic feed unavailable: {err}");
                errors.push(CycleError {
                    location_id: None,
                    message: format!("seismic feed: {err}"),
                });
                Vec::new()
            }
        };
        let quakes = Arc::new(quakes);

        let concurrency = self.config.engine.concurrency.max(1);
        let outcomes: Vec<(MonitoredLocation, Result<usize, TelemetryError>)> =
            stream::iter(targets)
                .map(|location| {
                    let quakes = Arc::clone(&quakes);
                    async move {
                        let outcome = self.process_location(&location, &quakes).await;
                        (location, outcome)
                    }
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;

        let mut alerts_generated = 0;
        let mut locations_processed = 0;
        for (location, outcome) in outcomes {
            match outcome {
                Ok(inserted) => {
                    locations_processed += 1;
                    alerts_generated += inserted;
                }
                Err(err) => {
                    warn!(location = %location.id, "location skipped: {err}");
                    errors.push(CycleError {
                        location_id: Some(location.id.clone()),
                        message: err.to_string(),
                    });
                }
            }
        }

        // Locations outside this cycle's target set still age out
        self.store.sweep(Utc::now()).await;
        *self.last_cycle.write().await = Some(cycle_time);

        let result = DetectionCycleResult {
            success: errors.is_empty(),
            alerts_generated,
            locations_processed,
            processing_time_ms: started.elapsed().as_millis() as u64,
            errors,
        };
        self.events.publish_cycle(result.clone());
        Ok(result)
    }

    /// Fetch telemetry for one location, run every classifier, update the
    /// store and recompute the status. Returns how many alerts were raised.
    async fn process_location(
        &self,
        location: &MonitoredLocation,
        quakes: &[EarthquakeEvent],
    ) -> Result<usize, TelemetryError> {
        let (weather, marine) = self.weather.fetch(&location.coordinates).await?;
        let now = Utc::now();

        let input = DetectorInput {
            location,
            weather: &weather,
            marine: &marine,
            earthquakes: quakes,
            thresholds: &self.config.thresholds,
            now,
        };
        let candidates = run_detectors(&input);

        let inserted = self.store.update(&location.id, candidates, now).await;
        for alert in &inserted {
            info!(
                location = %location.id,
                hazard = alert.hazard_type.label(),
                level = alert.alert_level.label(),
                confidence = alert.confidence,
                "hazard alert raised"
            );
            self.events.publish_alert(alert.clone());
        }

        let active = self.store.active_for_location(&location.id, now).await;
        let status = status::build_status(location, &active, Some(weather), Some(marine), now);
        self.statuses.write().await.insert(location.id.clone(), status);

        Ok(inserted.len())
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    /// Full snapshot: per-location statuses, rollup summary, the latest
    /// shared earthquake list and all active alerts, most severe first.
    /// Always well-formed, possibly stale after failed cycles.
    pub async fn get_all_status(&self) -> AllStatus {
        let now = Utc::now();
        let locations = self.statuses.read().await.clone();
        let global_alerts = self.store.get_active(&AlertFilter::default(), now).await;
        let recent_earthquakes = self.recent_quakes.read().await.clone();
        let last_cycle = *self.last_cycle.read().await;

        let (monitoring_active, next_cycle) = {
            let monitor = self.monitor.lock().await;
            match monitor.as_ref() {
                Some(m) => (
                    true,
                    last_cycle.map(|t| t + chrono::Duration::seconds(m.interval_secs as i64)),
                ),
                None => (false, None),
            }
        };

        let mut alerts_by_level: BTreeMap<String, usize> = BTreeMap::new();
        let mut alerts_by_hazard: BTreeMap<String, usize> = BTreeMap::new();
        for alert in &global_alerts {
            *alerts_by_level.entry(alert.alert_level.label().to_string()).or_insert(0) += 1;
            *alerts_by_hazard.entry(alert.hazard_type.label().to_string()).or_insert(0) += 1;
        }

        AllStatus {
            summary: MultiHazardSummary {
                total_active_alerts: global_alerts.len(),
                alerts_by_level,
                alerts_by_hazard,
                recent_earthquakes: recent_earthquakes.len(),
                monitoring_active,
                last_cycle,
                next_cycle,
            },
            locations,
            recent_earthquakes,
            global_alerts,
        }
    }

    /// Status for one location; a known location that has not been
    /// processed yet reports a baseline Normal status.
    pub async fn get_location_status(&self, id: &str) -> Result<LocationStatus, EngineError> {
        let location = self
            .registry
            .get(id)
            .ok_or_else(|| EngineError::UnknownLocation(id.to_string()))?;

        if let Some(status) = self.statuses.read().await.get(id) {
            return Ok(status.clone());
        }
        Ok(status::build_status(location, &[], None, None, Utc::now()))
    }

    /// Filtered active alerts, most severe first
    pub async fn get_active_alerts(&self, filter: &AlertFilter) -> Result<Vec<HazardAlert>, EngineError> {
        if let Some(id) = filter.location_id.as_deref() {
            if self.registry.get(id).is_none() {
                return Err(EngineError::UnknownLocation(id.to_string()));
            }
        }
        Ok(self.store.get_active(filter, Utc::now()).await)
    }
}
