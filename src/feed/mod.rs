/// Bounded most-recent-first list used by every telemetry stream
pub mod bounded_feed;

pub use bounded_feed::BoundedFeed;
