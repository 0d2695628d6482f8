//! Periodic producer workers driving the telemetry hub
//!
//! The engine owns three background threads on independent cadences: a
//! traffic sampler, a detection tick (incidents, threats, anomalies), and a
//! status snapshotter. Each thread blocks on its own shutdown channel with
//! `recv_timeout`, so the timeout doubles as the tick interval and shutdown
//! is immediate.

use crate::config::{EmissionConfig, IntervalConfig};
use crate::generators::{ProbabilitySource, RngSource, SyntheticSensor};
use crate::hub::TelemetryHub;
use log::{debug, info};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Background engine generating the synthetic telemetry feeds
pub struct MonitorEngine {
    hub: Arc<TelemetryHub>,
    intervals: IntervalConfig,
    emission: EmissionConfig,
    seed: Option<u64>,
    handles: Vec<JoinHandle<()>>,
    shutdown_senders: Vec<Sender<()>>,
}

impl MonitorEngine {
    /// Create an engine over the given hub; no threads run until `start`
    pub fn new(
        hub: Arc<TelemetryHub>,
        intervals: IntervalConfig,
        emission: EmissionConfig,
        seed: Option<u64>,
    ) -> Self {
        Self {
            hub,
            intervals,
            emission,
            seed,
            handles: Vec::new(),
            shutdown_senders: Vec::new(),
        }
    }

    fn sensor(&self, stream: u64) -> SyntheticSensor {
        // Offset the seed per worker so seeded runs don't produce three
        // identical streams.
        let source: Box<dyn ProbabilitySource + Send> = match self.seed {
            Some(seed) => Box::new(RngSource::seeded(seed.wrapping_add(stream))),
            None => Box::new(RngSource::from_entropy()),
        };
        SyntheticSensor::new(source)
    }

    /// Start the three producer threads; a no-op if already running
    pub fn start(&mut self) {
        if !self.handles.is_empty() {
            debug!("Engine already running");
            return;
        }

        info!(
            "Starting monitor engine (traffic every {}s, detections every {}s, status every {}s)",
            self.intervals.traffic_seconds,
            self.intervals.detection_seconds,
            self.intervals.status_seconds
        );

        self.spawn_traffic_thread();
        self.spawn_detection_thread();
        self.spawn_status_thread();
    }

    /// Stop all producer threads and wait for them to exit
    ///
    /// Stored records are untouched; a later `start` resumes feeding the
    /// same hub.
    pub fn stop(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        info!("Stopping monitor engine");
        for sender in self.shutdown_senders.drain(..) {
            let _ = sender.send(());
        }
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        info!("Monitor engine stopped");
    }

    /// Whether the producer threads are currently running
    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Set the monitoring flag and start or stop the workers to match
    pub fn set_monitoring(&mut self, enabled: bool) {
        self.hub.set_monitoring(enabled);
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Flip the monitoring flag and return the new state
    pub fn toggle_monitoring(&mut self) -> bool {
        let enabled = self.hub.toggle_monitoring();
        if enabled {
            self.start();
        } else {
            self.stop();
        }
        enabled
    }

    fn spawn_traffic_thread(&mut self) {
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();
        self.shutdown_senders.push(shutdown_sender);

        let hub = Arc::clone(&self.hub);
        let interval = Duration::from_secs(self.intervals.traffic_seconds);
        let suspicious_chance = self.emission.suspicious_traffic_chance;
        let mut sensor = self.sensor(1);

        let handle = thread::spawn(move || {
            info!("Traffic sampler thread started");

            loop {
                match shutdown_receiver.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        info!("Traffic sampler thread received shutdown signal");
                        break;
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        let sample = sensor.next_traffic_sample(suspicious_chance);
                        if sample.suspicious {
                            let alert = sensor.alert_for_traffic(&sample);
                            hub.record_alert(alert);
                        }
                        hub.record_traffic(sample);
                    }
                }
            }

            info!("Traffic sampler thread stopped");
        });

        self.handles.push(handle);
    }

    fn spawn_detection_thread(&mut self) {
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();
        self.shutdown_senders.push(shutdown_sender);

        let hub = Arc::clone(&self.hub);
        let interval = Duration::from_secs(self.intervals.detection_seconds);
        let emission = self.emission.clone();
        let mut sensor = self.sensor(2);

        let handle = thread::spawn(move || {
            info!("Detection thread started");

            loop {
                match shutdown_receiver.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        info!("Detection thread received shutdown signal");
                        break;
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        Self::detection_tick(&hub, &emission, &mut sensor);
                    }
                }
            }

            info!("Detection thread stopped");
        });

        self.handles.push(handle);
    }

    /// One detection cycle: each stream rolls its own emission chance, and
    /// records crossing their significance threshold co-emit an alert
    fn detection_tick(hub: &TelemetryHub, emission: &EmissionConfig, sensor: &mut SyntheticSensor) {
        if sensor.roll(emission.incident_chance) {
            let incident = sensor.next_incident();
            if incident.severity >= emission.incident_alert_severity {
                hub.record_alert(sensor.alert_for_incident(&incident));
            }
            hub.record_incident(incident);
        }

        if sensor.roll(emission.threat_chance) {
            let threat = sensor.next_threat();
            if threat.confidence >= emission.threat_alert_confidence {
                hub.record_alert(sensor.alert_for_threat(&threat));
            }
            hub.record_threat(threat);
        }

        if sensor.roll(emission.anomaly_chance) {
            let anomaly = sensor.next_anomaly();
            if anomaly.deviation_score >= emission.anomaly_alert_deviation {
                hub.record_alert(sensor.alert_for_anomaly(&anomaly));
            }
            hub.record_anomaly(anomaly);
        }
    }

    fn spawn_status_thread(&mut self) {
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();
        self.shutdown_senders.push(shutdown_sender);

        let hub = Arc::clone(&self.hub);
        let interval = Duration::from_secs(self.intervals.status_seconds);
        let mut sensor = self.sensor(3);

        let handle = thread::spawn(move || {
            info!("Status snapshot thread started");

            loop {
                match shutdown_receiver.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        info!("Status snapshot thread received shutdown signal");
                        break;
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        let status = sensor.next_status();
                        info!(
                            "System status: cpu {:.0}%, mem {:.0}%, {}/{} services online",
                            status.cpu_percent,
                            status.memory_percent,
                            status.services_online,
                            status.services_total
                        );
                        hub.record_status(status);
                    }
                }
            }

            info!("Status snapshot thread stopped");
        });

        self.handles.push(handle);
    }
}

impl Drop for MonitorEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::correlator::AlertCorrelator;
    use crate::hub::FeedCaps;

    fn fast_intervals() -> IntervalConfig {
        IntervalConfig {
            traffic_seconds: 1,
            detection_seconds: 1,
            status_seconds: 1,
        }
    }

    fn engine_with(emission: EmissionConfig) -> (Arc<TelemetryHub>, MonitorEngine) {
        let hub = Arc::new(TelemetryHub::new(
            FeedCaps::default(),
            AlertCorrelator::default(),
        ));
        let engine = MonitorEngine::new(Arc::clone(&hub), fast_intervals(), emission, Some(7));
        (hub, engine)
    }

    #[test]
    fn test_start_is_idempotent() {
        let (_hub, mut engine) = engine_with(EmissionConfig::default());
        engine.start();
        let running = engine.handles.len();
        engine.start();
        assert_eq!(engine.handles.len(), running);
        engine.stop();
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let (_hub, mut engine) = engine_with(EmissionConfig::default());
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_workers_produce_records() {
        let emission = EmissionConfig {
            incident_chance: 1.0,
            threat_chance: 1.0,
            anomaly_chance: 1.0,
            ..EmissionConfig::default()
        };
        let (hub, mut engine) = engine_with(emission);

        engine.start();
        thread::sleep(Duration::from_millis(2500));
        engine.stop();

        assert!(!hub.traffic().is_empty());
        assert!(!hub.incidents().is_empty());
        assert!(!hub.threats().is_empty());
        assert!(!hub.anomalies().is_empty());
        assert!(!hub.statuses().is_empty());
    }

    #[test]
    fn test_zero_chances_emit_no_detections() {
        let emission = EmissionConfig {
            incident_chance: 0.0,
            threat_chance: 0.0,
            anomaly_chance: 0.0,
            suspicious_traffic_chance: 0.0,
            ..EmissionConfig::default()
        };
        let (hub, mut engine) = engine_with(emission);

        engine.start();
        thread::sleep(Duration::from_millis(2500));
        engine.stop();

        assert!(hub.incidents().is_empty());
        assert!(hub.threats().is_empty());
        assert!(hub.anomalies().is_empty());
        assert!(hub.alerts().is_empty());
        // Unconditional streams still flow
        assert!(!hub.traffic().is_empty());
    }

    #[test]
    fn test_toggle_retains_records() {
        let emission = EmissionConfig {
            incident_chance: 1.0,
            ..EmissionConfig::default()
        };
        let (hub, mut engine) = engine_with(emission);

        engine.start();
        thread::sleep(Duration::from_millis(2500));

        assert!(!engine.toggle_monitoring());
        assert!(!engine.is_running());
        assert!(!hub.monitoring_enabled());

        let incidents_while_paused = hub.incidents().len();
        assert!(incidents_while_paused > 0);
        thread::sleep(Duration::from_millis(1500));
        assert_eq!(hub.incidents().len(), incidents_while_paused);

        assert!(engine.toggle_monitoring());
        assert!(engine.is_running());
        engine.stop();
    }

    #[test]
    fn test_detection_tick_respects_thresholds() {
        let config = Config::default();
        let hub = TelemetryHub::default();
        let mut sensor = SyntheticSensor::new(Box::new(RngSource::seeded(11)));

        // Force all three streams to emit on every tick
        let emission = EmissionConfig {
            incident_chance: 1.0,
            threat_chance: 1.0,
            anomaly_chance: 1.0,
            ..config.emission.clone()
        };

        for _ in 0..40 {
            MonitorEngine::detection_tick(&hub, &emission, &mut sensor);
        }

        assert_eq!(hub.incidents().len(), 40);
        assert_eq!(hub.threats().len(), 40);
        assert_eq!(hub.anomalies().len(), 40);

        // Only significant records may have co-emitted alerts
        for alert in hub.alerts() {
            match alert.source_system.as_str() {
                "Incident Manager" => {
                    assert!(alert.severity >= emission.incident_alert_severity)
                }
                "Threat Engine" => assert!(alert.risk_score >= emission.threat_alert_confidence * 100.0),
                "Anomaly Engine" => {
                    assert!(alert.risk_score >= emission.anomaly_alert_deviation * 20.0 - f64::EPSILON)
                }
                other => panic!("unexpected alert source {}", other),
            }
        }
    }
}
