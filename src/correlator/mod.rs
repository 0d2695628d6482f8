/// Alert correlation and deduplication over the bounded alert window
pub mod alert_correlator;

pub use alert_correlator::{AlertCorrelator, CorrelationConfig, MessageMatch};
