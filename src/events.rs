//! Core record types for the synthetic security telemetry feed
//!
//! This module defines the data structures carried by the six telemetry
//! streams: incidents, network traffic samples, system status snapshots,
//! alerts, threat detections, and anomaly detections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Timestamp type for consistent time handling across the application
pub type Timestamp = DateTime<Utc>;

/// Severity level for alerts and incidents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that may require attention
    Warning,
    /// Error indicating a problem
    Error,
    /// Critical issue requiring immediate attention
    Critical,
}

/// A derived notification record produced when an incident, threat, anomaly,
/// or traffic sample crosses a significance threshold.
///
/// The `is_duplicate` flag and `related_alerts` set are derived state: they
/// are written only by the correlation pass and recomputed from scratch
/// whenever a new alert is inserted into the history. Producers must leave
/// both at their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    /// Unique identifier, time+random derived
    pub id: String,
    /// When the alert was created
    pub timestamp: Timestamp,
    /// Free-text alert message
    pub message: String,
    /// Severity tag
    pub severity: Severity,
    /// Whether an operator has acknowledged this alert
    pub acknowledged: bool,
    /// Name of the subsystem that produced the alert
    pub source_system: String,
    /// Numeric risk score (0-100)
    pub risk_score: f64,
    /// Marked by the correlator when a similar older alert exists
    pub is_duplicate: bool,
    /// Identifiers of other alerts judged similar, populated by the correlator
    pub related_alerts: BTreeSet<String>,
}

impl Alert {
    /// Create a fresh alert with correlation state at its defaults
    pub fn new(
        id: String,
        timestamp: Timestamp,
        message: String,
        severity: Severity,
        source_system: String,
        risk_score: f64,
    ) -> Self {
        Self {
            id,
            timestamp,
            message,
            severity,
            acknowledged: false,
            source_system,
            risk_score,
            is_duplicate: false,
            related_alerts: BTreeSet::new(),
        }
    }
}

/// Lifecycle status of a security incident
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    /// Newly detected, nobody is on it yet
    Active,
    /// Under investigation
    Investigating,
    /// Closed out
    Resolved,
}

/// A synthetic security incident
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incident {
    /// Unique identifier, time+random derived
    pub id: String,
    /// When the incident was raised
    pub timestamp: Timestamp,
    /// Short human-readable title
    pub title: String,
    /// Longer description of what was observed
    pub description: String,
    /// Severity tag
    pub severity: Severity,
    /// Current lifecycle status; mutated only by resolve-incident
    pub status: IncidentStatus,
    /// Name of the affected subsystem
    pub affected_system: String,
}

impl Incident {
    /// Whether this incident has been resolved
    pub fn is_resolved(&self) -> bool {
        self.status == IncidentStatus::Resolved
    }
}

/// A point-in-time sample of synthetic network traffic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrafficSample {
    /// When the sample was taken
    pub timestamp: Timestamp,
    /// Source address of the sampled flow
    pub source_ip: String,
    /// Destination address of the sampled flow
    pub destination_ip: String,
    /// Transport protocol name
    pub protocol: String,
    /// Bytes received in the sampling interval
    pub bytes_in: u64,
    /// Bytes sent in the sampling interval
    pub bytes_out: u64,
    /// Packets observed in the sampling interval
    pub packet_count: u32,
    /// Whether the flow looks suspicious
    pub suspicious: bool,
}

/// A snapshot of overall system health
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStatus {
    /// When the snapshot was taken
    pub timestamp: Timestamp,
    /// CPU usage as a percentage (0-100)
    pub cpu_percent: f64,
    /// Memory usage as a percentage (0-100)
    pub memory_percent: f64,
    /// Network utilisation as a percentage (0-100)
    pub network_load_percent: f64,
    /// Number of active connections
    pub active_connections: u32,
    /// Services currently reporting healthy
    pub services_online: u32,
    /// Total number of monitored services
    pub services_total: u32,
}

/// Category of a threat detection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    Malware,
    BruteForce,
    PortScan,
    Phishing,
    DataExfiltration,
}

impl ThreatKind {
    /// Human-readable label for log lines and alert messages
    pub fn label(&self) -> &'static str {
        match self {
            ThreatKind::Malware => "Malware",
            ThreatKind::BruteForce => "Brute force",
            ThreatKind::PortScan => "Port scan",
            ThreatKind::Phishing => "Phishing",
            ThreatKind::DataExfiltration => "Data exfiltration",
        }
    }
}

/// A synthetic threat detection record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreatDetection {
    /// Unique identifier, time+random derived
    pub id: String,
    /// When the threat was detected
    pub timestamp: Timestamp,
    /// What kind of threat was detected
    pub kind: ThreatKind,
    /// Where the threat originated
    pub source_ip: String,
    /// Which system was targeted
    pub target_system: String,
    /// Detection confidence (0.0-1.0)
    pub confidence: f64,
    /// Whether the threat was blocked automatically
    pub blocked: bool,
}

/// A synthetic anomaly detection record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnomalyDetection {
    /// Unique identifier, time+random derived
    pub id: String,
    /// When the anomaly was detected
    pub timestamp: Timestamp,
    /// Name of the metric that deviated
    pub metric: String,
    /// Observed value of the metric
    pub observed: f64,
    /// Expected baseline value of the metric
    pub baseline: f64,
    /// How many standard deviations the observation sits from baseline
    pub deviation_score: f64,
    /// Human-readable description
    pub description: String,
}
