//! Simulated sensor producing synthetic telemetry records
//!
//! Each `next_*` method fabricates one independently randomized record; the
//! `alert_for_*` methods derive a correlated alert from a record that crossed
//! its significance threshold. All randomness is drawn from the injected
//! `ProbabilitySource`, so a seeded source reproduces the whole feed.

use crate::events::{
    Alert, AnomalyDetection, Incident, IncidentStatus, Severity, SystemStatus, ThreatDetection,
    ThreatKind, TrafficSample,
};
use crate::generators::probability::ProbabilitySource;
use chrono::Utc;

const SOURCE_IPS: &[&str] = &[
    "10.0.0.1",
    "10.0.0.23",
    "172.16.4.9",
    "192.168.1.77",
    "203.0.113.7",
    "198.51.100.42",
];

const TARGET_SYSTEMS: &[&str] = &[
    "Auth Service",
    "Web Gateway",
    "Database",
    "File Server",
    "Mail Relay",
];

const PROTOCOLS: &[&str] = &["tcp", "udp", "icmp"];

const INCIDENT_TEMPLATES: &[(&str, &str)] = &[
    (
        "Unauthorized access attempt",
        "Multiple failed login attempts from a single address",
    ),
    (
        "Privilege escalation detected",
        "Service account acquired unexpected administrative rights",
    ),
    (
        "Unusual outbound transfer",
        "Large data transfer to an unrecognized external host",
    ),
    (
        "Service degradation",
        "Elevated error rate and latency on a monitored endpoint",
    ),
    (
        "Configuration drift",
        "Firewall rule set differs from the approved baseline",
    ),
];

const THREAT_KINDS: &[ThreatKind] = &[
    ThreatKind::Malware,
    ThreatKind::BruteForce,
    ThreatKind::PortScan,
    ThreatKind::Phishing,
    ThreatKind::DataExfiltration,
];

const ANOMALY_METRICS: &[(&str, f64)] = &[
    ("cpu_percent", 35.0),
    ("memory_percent", 55.0),
    ("network_load_percent", 25.0),
    ("disk_io_ops", 120.0),
];

const GENERIC_ALERT_MESSAGES: &[(&str, &str)] = &[
    ("Network Monitor", "Unusual connection volume detected"),
    ("Threat Engine", "Signature match on inbound payload"),
    ("Anomaly Engine", "Metric drift beyond configured band"),
    ("Incident Manager", "Repeated policy violation recorded"),
];

/// Simulated sensor collaborator
///
/// Side-effect-free apart from consuming randomness: every call produces a
/// fresh record and never touches shared state.
pub struct SyntheticSensor {
    source: Box<dyn ProbabilitySource + Send>,
}

impl SyntheticSensor {
    /// Create a sensor drawing randomness from the given source
    pub fn new(source: Box<dyn ProbabilitySource + Send>) -> Self {
        Self { source }
    }

    /// Roll an emission chance against the injected source
    pub fn roll(&mut self, probability: f64) -> bool {
        self.source.chance(probability)
    }

    /// Time+random derived identifier, unique enough for a bounded window
    fn record_id(&mut self) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix = self.source.range_u32(0, u32::MAX);
        format!("{}-{:08x}", millis, suffix)
    }

    fn pick<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options[self.source.pick_index(options.len())]
    }

    /// Severity drawn with a bias toward warnings
    fn random_severity(&mut self) -> Severity {
        if self.source.chance(0.15) {
            Severity::Critical
        } else if self.source.chance(0.35) {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    fn risk_score_for(&mut self, severity: Severity) -> f64 {
        match severity {
            Severity::Warning => self.source.range_f64(25.0, 55.0),
            Severity::Error => self.source.range_f64(55.0, 80.0),
            Severity::Critical => self.source.range_f64(80.0, 99.0),
        }
    }

    /// Fabricate one security incident
    pub fn next_incident(&mut self) -> Incident {
        let idx = self.source.pick_index(INCIDENT_TEMPLATES.len());
        let (title, description) = INCIDENT_TEMPLATES[idx];
        let severity = self.random_severity();

        Incident {
            id: self.record_id(),
            timestamp: Utc::now(),
            title: title.to_string(),
            description: description.to_string(),
            severity,
            status: IncidentStatus::Active,
            affected_system: self.pick(TARGET_SYSTEMS).to_string(),
        }
    }

    /// Fabricate one network traffic sample
    ///
    /// `suspicious_chance` is the probability that the sample is flagged
    /// suspicious, which makes it alert-significant.
    pub fn next_traffic_sample(&mut self, suspicious_chance: f64) -> TrafficSample {
        let suspicious = self.source.chance(suspicious_chance);
        TrafficSample {
            timestamp: Utc::now(),
            source_ip: self.pick(SOURCE_IPS).to_string(),
            destination_ip: self.pick(SOURCE_IPS).to_string(),
            protocol: self.pick(PROTOCOLS).to_string(),
            bytes_in: self.source.range_u32(256, 1_048_576) as u64,
            bytes_out: self.source.range_u32(128, 524_288) as u64,
            packet_count: self.source.range_u32(1, 2048),
            suspicious,
        }
    }

    /// Fabricate one system status snapshot
    pub fn next_status(&mut self) -> SystemStatus {
        let services_total = 12;
        SystemStatus {
            timestamp: Utc::now(),
            cpu_percent: self.source.range_f64(5.0, 95.0),
            memory_percent: self.source.range_f64(20.0, 90.0),
            network_load_percent: self.source.range_f64(1.0, 80.0),
            active_connections: self.source.range_u32(10, 500),
            services_online: self.source.range_u32(services_total - 2, services_total),
            services_total,
        }
    }

    /// Fabricate one threat detection
    pub fn next_threat(&mut self) -> ThreatDetection {
        let kind = THREAT_KINDS[self.source.pick_index(THREAT_KINDS.len())];
        let confidence = self.source.range_f64(0.5, 1.0);
        ThreatDetection {
            id: self.record_id(),
            timestamp: Utc::now(),
            kind,
            source_ip: self.pick(SOURCE_IPS).to_string(),
            target_system: self.pick(TARGET_SYSTEMS).to_string(),
            confidence,
            blocked: self.source.chance(0.6),
        }
    }

    /// Fabricate one anomaly detection
    pub fn next_anomaly(&mut self) -> AnomalyDetection {
        let idx = self.source.pick_index(ANOMALY_METRICS.len());
        let (metric, baseline) = ANOMALY_METRICS[idx];
        let deviation_score = self.source.range_f64(1.0, 5.0);
        let observed = baseline + baseline * deviation_score * 0.12;

        AnomalyDetection {
            id: self.record_id(),
            timestamp: Utc::now(),
            metric: metric.to_string(),
            observed,
            baseline,
            deviation_score,
            description: format!(
                "{} at {:.1}, {:.1} standard deviations above baseline {:.1}",
                metric, observed, deviation_score, baseline
            ),
        }
    }

    /// Fabricate one free-standing alert, unrelated to any other record
    pub fn next_alert(&mut self) -> Alert {
        let idx = self.source.pick_index(GENERIC_ALERT_MESSAGES.len());
        let (source_system, message) = GENERIC_ALERT_MESSAGES[idx];
        let severity = self.random_severity();
        let risk_score = self.risk_score_for(severity);

        Alert::new(
            self.record_id(),
            Utc::now(),
            message.to_string(),
            severity,
            source_system.to_string(),
            risk_score,
        )
    }

    /// Derive the correlated alert for a suspicious traffic sample
    pub fn alert_for_traffic(&mut self, sample: &TrafficSample) -> Alert {
        Alert::new(
            self.record_id(),
            sample.timestamp,
            format!("Suspicious traffic from {}", sample.source_ip),
            Severity::Warning,
            "Network Monitor".to_string(),
            self.source.range_f64(40.0, 70.0),
        )
    }

    /// Derive the correlated alert for a significant incident
    pub fn alert_for_incident(&mut self, incident: &Incident) -> Alert {
        let risk_score = self.risk_score_for(incident.severity);
        Alert::new(
            self.record_id(),
            incident.timestamp,
            format!("{} on {}", incident.title, incident.affected_system),
            incident.severity,
            "Incident Manager".to_string(),
            risk_score,
        )
    }

    /// Derive the correlated alert for a high-confidence threat detection
    pub fn alert_for_threat(&mut self, threat: &ThreatDetection) -> Alert {
        let severity = if threat.confidence >= 0.9 {
            Severity::Critical
        } else {
            Severity::Error
        };
        Alert::new(
            self.record_id(),
            threat.timestamp,
            format!(
                "{} detected from {} targeting {}",
                threat.kind.label(),
                threat.source_ip,
                threat.target_system
            ),
            severity,
            "Threat Engine".to_string(),
            threat.confidence * 100.0,
        )
    }

    /// Derive the correlated alert for a strong anomaly
    pub fn alert_for_anomaly(&mut self, anomaly: &AnomalyDetection) -> Alert {
        let severity = if anomaly.deviation_score >= 4.0 {
            Severity::Error
        } else {
            Severity::Warning
        };
        Alert::new(
            self.record_id(),
            anomaly.timestamp,
            anomaly.description.clone(),
            severity,
            "Anomaly Engine".to_string(),
            (anomaly.deviation_score * 20.0).min(95.0),
        )
    }
}
