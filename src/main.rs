use clap::Parser;
use log::{error, info, warn};
use siren::config::Config;
use siren::correlator::AlertCorrelator;
use siren::engine::MonitorEngine;
use siren::error::ConfigError;
use siren::hub::{FeedCaps, TelemetryHub};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;

/// Command-line arguments for the siren telemetry engine
#[derive(Parser)]
#[command(
    name = "siren",
    about = "Synthetic security-operations telemetry engine",
    long_about = "Generates a continuous synthetic feed of security incidents, network traffic, \
                  system status, threat detections, and anomaly detections, correlating the \
                  resulting alerts into duplicate and related clusters."
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,

    /// Fixed RNG seed for a reproducible feed
    #[arg(short, long, value_name = "SEED", help = "Fixed RNG seed; overrides the config file")]
    seed: Option<u64>,
}

/// Resolve the effective configuration for this run
///
/// The engine always comes up: a missing file gets a warning and an
/// unreadable or invalid one gets the error logged, with defaults taking
/// over in both cases. Only an explicit, readable, valid file changes
/// anything.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        info!("No config file given, running on defaults");
        return Config::default();
    };

    match Config::from_file(path) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Err(ConfigError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} does not exist, running on defaults", path.display());
            Config::default()
        }
        Err(e) => {
            error!("Ignoring config file {}: {}", path.display(), e);
            Config::default()
        }
    }
}

fn feed_caps(config: &Config) -> FeedCaps {
    FeedCaps {
        incidents: config.feeds.incidents,
        traffic: config.feeds.traffic,
        statuses: config.feeds.statuses,
        alerts: config.feeds.alerts,
        threats: config.feeds.threats,
        anomalies: config.feeds.anomalies,
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    info!("Starting siren telemetry engine");

    let config = load_config(cli.config.as_deref());

    // CLI seed wins over the config file
    let seed = cli.seed.or(config.engine.seed);
    if let Some(seed) = seed {
        info!("Using fixed RNG seed {}", seed);
    }

    let correlator = AlertCorrelator::new(config.correlation.to_correlation_config());
    let hub = Arc::new(TelemetryHub::new(feed_caps(&config), correlator));

    let mut engine = MonitorEngine::new(
        Arc::clone(&hub),
        config.intervals.clone(),
        config.emission.clone(),
        seed,
    );
    engine.start();

    // Graceful shutdown on SIGINT
    let (shutdown_sender, shutdown_receiver) = mpsc::channel::<()>();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received interrupt signal (SIGINT), shutting down gracefully...");
        let _ = shutdown_sender.send(());
    }) {
        error!("Error setting SIGINT handler: {}", e);
        std::process::exit(1);
    }

    info!("Telemetry engine is running. Press Ctrl+C to stop.");

    if let Err(e) = shutdown_receiver.recv() {
        error!("Error waiting for shutdown: {}", e);
    }

    engine.stop();
    info!(
        "Shutdown complete ({} incidents, {} alerts in the final window)",
        hub.incidents().len(),
        hub.alerts().len()
    );
}
