/// Error types for configuration loading
pub mod error;

/// Telemetry record types shared across the crate
pub mod events;

/// Bounded most-recent-first feed
pub mod feed;

/// Alert similarity correlation
pub mod correlator;

/// Synthetic record generation
pub mod generators;

/// Shared telemetry state and mutators
pub mod hub;

/// Periodic producer workers
pub mod engine;

/// Configuration management
pub mod config;

// Re-export commonly used types
pub use correlator::{AlertCorrelator, CorrelationConfig};
pub use engine::MonitorEngine;
pub use error::ConfigError;
pub use hub::TelemetryHub;
