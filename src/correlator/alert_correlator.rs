//! Alert correlation and deduplication over a bounded rolling window
//!
//! Given the full alert history (ordered most-recent-first), the correlator
//! recomputes each alert's duplicate flag and related-alert set by comparing
//! it against every other alert in the window. The pass is deterministic,
//! never reorders or drops entries, and treats both annotations as derived
//! state that is rebuilt from scratch on every call.

use crate::events::Alert;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How alert messages are compared when judging similarity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageMatch {
    /// Byte-for-byte equality
    Exact,
    /// Case-insensitive equality after trimming surrounding whitespace
    #[default]
    Normalized,
}

/// Tunable parameters for the similarity rule
///
/// Two alerts are similar when they share a source system, their messages
/// match under the configured mode, and their timestamps sit within the
/// configured window of each other.
#[derive(Debug, Clone)]
pub struct CorrelationConfig {
    /// Maximum timestamp distance for two alerts to be considered similar
    pub window: Duration,
    /// Message comparison mode
    pub message_match: MessageMatch,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            window: Duration::seconds(60),
            message_match: MessageMatch::Normalized,
        }
    }
}

/// Correlates alerts within the bounded history window
///
/// Holds no state beyond its configuration; identical input always produces
/// identical output.
#[derive(Debug, Clone, Default)]
pub struct AlertCorrelator {
    config: CorrelationConfig,
}

impl AlertCorrelator {
    /// Create a correlator with the given configuration
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Recompute duplicate flags and related-alert sets for the whole window
    ///
    /// The returned list has the same length and the same relative order as
    /// the input; only `is_duplicate` and `related_alerts` differ. An alert
    /// is marked duplicate when a similar alert exists that is strictly
    /// older, so the earliest member of a similar cluster stays unflagged.
    /// Lists of zero or one alerts come back with no duplicates and empty
    /// related sets.
    pub fn correlate(&self, alerts: &[Alert]) -> Vec<Alert> {
        let mut result: Vec<Alert> = alerts.to_vec();

        for (i, alert) in alerts.iter().enumerate() {
            let mut related = BTreeSet::new();
            let mut duplicate = false;

            for (j, other) in alerts.iter().enumerate() {
                if i == j || !self.similar(alert, other) {
                    continue;
                }
                related.insert(other.id.clone());

                // The alert nearer the tail of the most-recent-first list is
                // the original; everything similar and newer is a duplicate.
                let other_is_older = other.timestamp < alert.timestamp
                    || (other.timestamp == alert.timestamp && j > i);
                if other_is_older {
                    duplicate = true;
                }
            }

            result[i].is_duplicate = duplicate;
            result[i].related_alerts = related;
        }

        result
    }

    /// Apply the similarity rule to a pair of alerts
    fn similar(&self, a: &Alert, b: &Alert) -> bool {
        if a.source_system != b.source_system {
            return false;
        }
        if !self.messages_match(&a.message, &b.message) {
            return false;
        }
        let delta = (a.timestamp - b.timestamp).abs();
        delta <= self.config.window
    }

    /// Compare two messages under the configured match mode
    fn messages_match(&self, a: &str, b: &str) -> bool {
        match self.config.message_match {
            MessageMatch::Exact => a == b,
            MessageMatch::Normalized => a.trim().eq_ignore_ascii_case(b.trim()),
        }
    }
}
