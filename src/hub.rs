//! Shared telemetry state and its mutators
//!
//! The `TelemetryHub` owns the six bounded feeds plus the monitoring flag,
//! and is shared across producer threads and the consuming layer via `Arc`.
//! All mutation is whole-list style: a producer locks one feed, computes the
//! new list, and swaps it in, so each insertion (including the correlation
//! pass it triggers) is atomic with respect to every other callback.

use crate::correlator::AlertCorrelator;
use crate::events::{
    Alert, AnomalyDetection, Incident, IncidentStatus, SystemStatus, ThreatDetection,
    TrafficSample,
};
use crate::feed::BoundedFeed;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Capacities for the six feeds
#[derive(Debug, Clone, Copy)]
pub struct FeedCaps {
    pub incidents: usize,
    pub traffic: usize,
    pub statuses: usize,
    pub alerts: usize,
    pub threats: usize,
    pub anomalies: usize,
}

impl Default for FeedCaps {
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

/// In-memory store for all telemetry streams
pub struct TelemetryHub {
    incidents: Mutex<BoundedFeed<Incident>>,
    traffic: Mutex<BoundedFeed<TrafficSample>>,
    statuses: Mutex<BoundedFeed<SystemStatus>>,
    alerts: Mutex<BoundedFeed<Alert>>,
    threats: Mutex<BoundedFeed<ThreatDetection>>,
    anomalies: Mutex<BoundedFeed<AnomalyDetection>>,
    correlator: AlertCorrelator,
    monitoring: AtomicBool,
}

impl TelemetryHub {
    /// Create a hub with the given feed capacities and correlator
    ///
    /// Monitoring starts enabled.
    pub fn new(caps: FeedCaps, correlator: AlertCorrelator) -> Self {
        Self {
            incidents: Mutex::new(BoundedFeed::new(caps.incidents)),
            traffic: Mutex::new(BoundedFeed::new(caps.traffic)),
            statuses: Mutex::new(BoundedFeed::new(caps.statuses)),
            alerts: Mutex::new(BoundedFeed::new(caps.alerts)),
            threats: Mutex::new(BoundedFeed::new(caps.threats)),
            anomalies: Mutex::new(BoundedFeed::new(caps.anomalies)),
            correlator,
            monitoring: AtomicBool::new(true),
        }
    }

    /// Store a new incident at the head of the incident feed
    pub fn record_incident(&self, incident: Incident) {
        debug!("Recording incident: {}", incident.title);
        self.incidents.lock().unwrap().push(incident);
    }

    /// Store a new traffic sample
    pub fn record_traffic(&self, sample: TrafficSample) {
        self.traffic.lock().unwrap().push(sample);
    }

    /// Store a new status snapshot
    pub fn record_status(&self, status: SystemStatus) {
        self.statuses.lock().unwrap().push(status);
    }

    /// Store a new threat detection
    pub fn record_threat(&self, threat: ThreatDetection) {
        debug!(
            "Recording threat detection: {} from {}",
            threat.kind.label(),
            threat.source_ip
        );
        self.threats.lock().unwrap().push(threat);
    }

    /// Store a new anomaly detection
    pub fn record_anomaly(&self, anomaly: AnomalyDetection) {
        debug!("Recording anomaly: {}", anomaly.metric);
        self.anomalies.lock().unwrap().push(anomaly);
    }

    /// Insert an alert and rerun correlation over the whole window
    ///
    /// The feed handles eviction; the correlated list replaces the stored one
    /// in a single operation under the feed lock.
    pub fn record_alert(&self, alert: Alert) {
        info!(
            "Recording alert from {}: {}",
            alert.source_system, alert.message
        );
        let mut alerts = self.alerts.lock().unwrap();
        alerts.push(alert);
        let correlated = self.correlator.correlate(&alerts.snapshot());
        alerts.replace(correlated);
    }

    /// Mark one alert acknowledged; unknown ids are a no-op
    ///
    /// Returns whether a matching alert was found.
    pub fn acknowledge_alert(&self, id: &str) -> bool {
        let mut alerts = self.alerts.lock().unwrap();
        let found = match alerts.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                info!("Alert {} acknowledged", id);
                true
            }
            None => {
                debug!("Acknowledge requested for unknown alert id {}", id);
                false
            }
        };
        found
    }

    /// Mark one incident resolved; unknown ids are a no-op
    ///
    /// Returns whether a matching incident was found.
    pub fn resolve_incident(&self, id: &str) -> bool {
        let mut incidents = self.incidents.lock().unwrap();
        let found = match incidents.iter_mut().find(|incident| incident.id == id) {
            Some(incident) => {
                incident.status = IncidentStatus::Resolved;
                info!("Incident {} resolved", id);
                true
            }
            None => {
                debug!("Resolve requested for unknown incident id {}", id);
                false
            }
        };
        found
    }

    /// Whether the periodic producers should be running
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    /// Set the monitoring flag directly
    pub fn set_monitoring(&self, enabled: bool) {
        self.monitoring.store(enabled, Ordering::SeqCst);
    }

    /// Flip the monitoring flag and return the new state
    pub fn toggle_monitoring(&self) -> bool {
        let enabled = !self.monitoring.fetch_xor(true, Ordering::SeqCst);
        info!(
            "Monitoring {}",
            if enabled { "enabled" } else { "disabled" }
        );
        enabled
    }

    /// Current incidents, most-recent-first
    pub fn incidents(&self) -> Vec<Incident> {
        self.incidents.lock().unwrap().snapshot()
    }

    /// Current traffic samples, most-recent-first
    pub fn traffic(&self) -> Vec<TrafficSample> {
        self.traffic.lock().unwrap().snapshot()
    }

    /// Current status snapshots, most-recent-first
    pub fn statuses(&self) -> Vec<SystemStatus> {
        self.statuses.lock().unwrap().snapshot()
    }

    /// Current alert window, most-recent-first, correlation annotations applied
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().snapshot()
    }

    /// Current threat detections, most-recent-first
    pub fn threats(&self) -> Vec<ThreatDetection> {
        self.threats.lock().unwrap().snapshot()
    }

    /// Current anomaly detections, most-recent-first
    pub fn anomalies(&self) -> Vec<AnomalyDetection> {
        self.anomalies.lock().unwrap().snapshot()
    }
}

impl Default for TelemetryHub {
    fn default() -> Self {
        Self::new(FeedCaps::default(), AlertCorrelator::default())
    }
}
