/// Injectable probability source backing the synthetic generators
pub mod probability;

/// Simulated sensor producing one typed record per call
pub mod sensor;

pub use probability::{ProbabilitySource, RngSource};
pub use sensor::SyntheticSensor;
