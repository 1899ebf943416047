pub mod counters;
pub mod experiment;
pub mod random;

pub use counters::Counter;
pub use counters::DualCounter;
pub use counters::ExactCounter;
pub use counters::MorrisCounter;
pub use experiment::{ConfigError, ExperimentConfig};
pub use random::{ScriptedSource, SeededSource, SharedSource, UniformSource};
