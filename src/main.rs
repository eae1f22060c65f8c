// Copyright (c) 2026 coastwatch project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/coastwatch/coastwatch-rs

//! CoastWatch - Coastal Multi-Hazard Detection Engine
//!
//! Headless monitoring daemon: loads configuration, wires live or simulated
//! telemetry providers into the engine, starts the periodic detection loop
//! and logs raised alerts until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use coastwatch::telemetry::{SimulatedTelemetry, UsgsEarthquakeClient, WeatherApiClient};
use coastwatch::{Config, EarthquakeProvider, EngineEvent, HazardEngine, WeatherProvider, VERSION};

/// CoastWatch - Coastal Multi-Hazard Detection Engine
#[derive(Parser, Debug)]
#[command(name = "coastwatch")]
#[command(author = "CoastWatch Project")]
#[command(version = VERSION)]
#[command(about = "Tsunami, cyclone, high-wave, flood and rip-current monitoring")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Use simulated telemetry (no API keys required)
    #[arg(long)]
    demo: bool,

    /// Detection cycle interval in seconds (overrides config)
    #[arg(long)]
    interval: Option<u64>,

    /// Run a single detection cycle, print the result as JSON and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("CoastWatch v{} - Coastal Multi-Hazard Detection Engine", VERSION);

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;
    if args.demo {
        config.demo_mode = true;
    }
    let interval_secs = args.interval.unwrap_or(config.engine.interval_secs);

    info!("Configuration loaded from {:?}", config_path);
    info!("Demo mode: {}", config.demo_mode);
    info!("Monitoring {} coastal locations", config.locations.len());

    let (weather, earthquakes): (Arc<dyn WeatherProvider>, Arc<dyn EarthquakeProvider>) =
        if config.demo_mode {
            let simulator = Arc::new(SimulatedTelemetry::new());
            (simulator.clone(), simulator)
        } else {
            if config.telemetry.weather_api_key.is_empty() {
                warn!("weather_api_key is empty; live weather fetches will be rejected");
            }
            (
                Arc::new(WeatherApiClient::new(&config.telemetry)?),
                Arc::new(UsgsEarthquakeClient::new(&config.telemetry)?),
            )
        };

    let engine = Arc::new(HazardEngine::new(config, weather, earthquakes));

    if args.once {
        let result = engine.run_cycle(None).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut events = engine.events().subscribe();
    engine.start(interval_secs).await?;
    info!("Press Ctrl+C to shut down");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            event = events.recv() => match event {
                Ok(EngineEvent::AlertRaised(alert)) => info!(
                    location = %alert.location_id,
                    hazard = alert.hazard_type.label(),
                    level = alert.alert_level.label(),
                    "ALERT {}",
                    alert.recommendations.first().map(String::as_str).unwrap_or("")
                ),
                Ok(EngineEvent::CycleCompleted(result)) => debug!(
                    alerts = result.alerts_generated,
                    locations = result.locations_processed,
                    "cycle completed"
                ),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("event subscriber lagged, {skipped} events dropped");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    engine.stop().await?;
    info!("CoastWatch shutdown complete");
    Ok(())
}
