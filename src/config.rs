//! TOML configuration for intervals, feed capacities, correlation, and
//! emission probabilities
//!
//! Every section and field has a default, so a partial config file only
//! overrides what it names. Validation catches capacities of zero,
//! probabilities outside 0.0-1.0, and degenerate windows before anything is
//! built from the values.

use crate::correlator::{CorrelationConfig, MessageMatch};
use crate::error::ConfigError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Timer cadences for the producer workers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntervalConfig {
    /// Seconds between traffic samples
    pub traffic_seconds: u64,
    /// Seconds between detection ticks (incidents, threats, anomalies)
    pub detection_seconds: u64,
    /// Seconds between status snapshots
    pub status_seconds: u64,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            traffic_seconds: 2,
            detection_seconds: 5,
            status_seconds: 10,
        }
    }
}

/// Capacity of each bounded feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub incidents: usize,
    pub traffic: usize,
    pub statuses: usize,
    pub alerts: usize,
    pub threats: usize,
    pub anomalies: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            incidents: 50,
            traffic: 100,
            statuses: 15,
            alerts: 20,
            threats: 50,
            anomalies: 50,
        }
    }
}

/// Similarity rule parameters for the alert correlator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorrelationSettings {
    /// Maximum timestamp distance, in seconds, for two alerts to correlate
    pub window_seconds: i64,
    /// Message comparison mode
    pub message_match: MessageMatch,
}

impl Default for CorrelationSettings {
    fn default() -> Self {
        Self {
            window_seconds: 60,
            message_match: MessageMatch::Normalized,
        }
    }
}

impl CorrelationSettings {
    /// Convert to the correlator's own config type
    pub fn to_correlation_config(&self) -> CorrelationConfig {
        CorrelationConfig {
            window: Duration::seconds(self.window_seconds),
            message_match: self.message_match,
        }
    }
}

/// Emission probabilities and alert-significance thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmissionConfig {
    /// Probability that a detection tick emits an incident
    pub incident_chance: f64,
    /// Probability that a detection tick emits a threat detection
    pub threat_chance: f64,
    /// Probability that a detection tick emits an anomaly detection
    pub anomaly_chance: f64,
    /// Probability that a traffic sample is flagged suspicious
    pub suspicious_traffic_chance: f64,
    /// Minimum incident severity that co-emits an alert
    pub incident_alert_severity: crate::events::Severity,
    /// Minimum threat confidence that co-emits an alert
    pub threat_alert_confidence: f64,
    /// Minimum anomaly deviation score that co-emits an alert
    pub anomaly_alert_deviation: f64,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            incident_chance: 0.3,
            threat_chance: 0.4,
            anomaly_chance: 0.25,
            suspicious_traffic_chance: 0.1,
            incident_alert_severity: crate::events::Severity::Error,
            threat_alert_confidence: 0.8,
            anomaly_alert_deviation: 3.0,
        }
    }
}

/// Engine-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed RNG seed for reproducible feeds; entropy-seeded when absent
    pub seed: Option<u64>,
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub intervals: IntervalConfig,
    pub feeds: FeedConfig,
    pub correlation: CorrelationSettings,
    pub emission: EmissionConfig,
    pub engine: EngineConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, seconds) in [
            ("intervals.traffic_seconds", self.intervals.traffic_seconds),
            (
                "intervals.detection_seconds",
                self.intervals.detection_seconds,
            ),
            ("intervals.status_seconds", self.intervals.status_seconds),
        ] {
            if seconds == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        for (name, cap) in [
            ("feeds.incidents", self.feeds.incidents),
            ("feeds.traffic", self.feeds.traffic),
            ("feeds.statuses", self.feeds.statuses),
            ("feeds.alerts", self.feeds.alerts),
            ("feeds.threats", self.feeds.threats),
            ("feeds.anomalies", self.feeds.anomalies),
        ] {
            if cap == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        if self.correlation.window_seconds <= 0 {
            return Err(ConfigError::ValidationError(
                "correlation.window_seconds must be positive".to_string(),
            ));
        }

        for (name, p) in [
            ("emission.incident_chance", self.emission.incident_chance),
            ("emission.threat_chance", self.emission.threat_chance),
            ("emission.anomaly_chance", self.emission.anomaly_chance),
            (
                "emission.suspicious_traffic_chance",
                self.emission.suspicious_traffic_chance,
            ),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, p
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.emission.threat_alert_confidence) {
            return Err(ConfigError::ValidationError(format!(
                "emission.threat_alert_confidence must be between 0.0 and 1.0, got {}",
                self.emission.threat_alert_confidence
            )));
        }

        if self.emission.anomaly_alert_deviation < 0.0 {
            return Err(ConfigError::ValidationError(
                "emission.anomaly_alert_deviation must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feeds.alerts, 20);
        assert_eq!(config.intervals.traffic_seconds, 2);
        assert_eq!(config.correlation.window_seconds, 60);
    }

    #[test]
    fn test_partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[correlation]\nwindow_seconds = 120\n\n[feeds]\ntraffic = 40"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.correlation.window_seconds, 120);
        assert_eq!(config.feeds.traffic, 40);
        // Untouched sections keep their defaults
        assert_eq!(config.feeds.alerts, 20);
        assert_eq!(config.intervals.detection_seconds, 5);
    }

    #[test]
    fn test_message_match_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[correlation]\nmessage_match = \"exact\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.correlation.message_match, MessageMatch::Exact);

        let correlation = config.correlation.to_correlation_config();
        assert_eq!(correlation.window, Duration::seconds(60));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::from_file(Path::new("/nonexistent/siren.toml"));
        match result {
            Err(ConfigError::IoError(e)) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("expected IoError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [").unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default();
        config.feeds.alerts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = Config::default();
        config.intervals.traffic_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let mut config = Config::default();
        config.emission.incident_chance = 1.5;
        assert!(config.validate().is_err());

        config.emission.incident_chance = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_window_rejected() {
        let mut config = Config::default();
        config.correlation.window_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seed_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nseed = 42").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.engine.seed, Some(42));
    }
}
