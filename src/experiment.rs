use crate::counters::{DualCounter, ExactCounter, MorrisCounter};
use crate::random::{self, SeededSource, SharedSource};
use thiserror::Error;

/// Configuration failures are the only recoverable errors in the experiment;
/// they are surfaced before any work begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("population needs at least two counters to compare, got {0}")]
    PopulationTooSmall(usize),

    #[error("trial count must be positive")]
    NoTrials,

    #[error("max counter value must be at least 1")]
    ZeroMaxValue,
}

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Number of paired counters in the population.
    pub total_counters: usize,
    /// Number of counted pair comparisons.
    pub trials: u64,
    /// Inclusive upper bound on each entity's true count.
    pub max_counter_value: u64,
    /// Seed for a reproducible run; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            total_counters: 100_000,
            trials: 1_000_000,
            max_counter_value: 512,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_counters < 2 {
            return Err(ConfigError::PopulationTooSmall(self.total_counters));
        }
        if self.trials == 0 {
            return Err(ConfigError::NoTrials);
        }
        if self.max_counter_value < 1 {
            return Err(ConfigError::ZeroMaxValue);
        }
        Ok(())
    }
}

type PairedCounter = DualCounter<ExactCounter, MorrisCounter<SharedSource<SeededSource>>>;

/// Runs the ordering experiment and returns the fraction of trials where the
/// approximate ordering agreed with the true ordering, as a percentage.
///
/// All randomness (true counts, Morris draws, trial indices) comes from one
/// sequential stream, so a seeded run reproduces its result exactly.
pub fn run(config: &ExperimentConfig) -> Result<f64, ConfigError> {
    config.validate()?;

    let mut source = SharedSource::new(match config.seed {
        Some(seed) => SeededSource::from_seed(seed),
        None => SeededSource::from_entropy(),
    });

    let population = build_population(config, &source);

    let mut agreements: u64 = 0;
    for _ in 0..config.trials {
        let (first, second) = distinct_indices(&mut source, population.len());
        if population[first].order_agrees(&population[second]) {
            agreements += 1;
        }
    }

    Ok(agreements as f64 / config.trials as f64 * 100.0)
}

/// Builds the population one entity at a time: draw a true count, then drive
/// a fresh pair through that many increments before the next entity starts.
fn build_population(config: &ExperimentConfig, source: &SharedSource<SeededSource>) -> Vec<PairedCounter> {
    let mut source = source.clone();
    (0..config.total_counters)
        .map(|_| {
            let true_count = random::next_count(&mut source, config.max_counter_value);
            let mut pair =
                DualCounter::new(ExactCounter::new(), MorrisCounter::new(source.clone()));
            for _ in 0..true_count {
                pair.increment();
            }
            pair
        })
        .collect()
}

/// Draws a pair of distinct indices in `[0, bound)`. A self-pair is discarded
/// and redrawn so it never counts against the trial budget.
fn distinct_indices(source: &mut SharedSource<SeededSource>, bound: usize) -> (usize, usize) {
    loop {
        let first = random::next_index(source, bound);
        let second = random::next_index(source, bound);
        if first != second {
            return (first, second);
        }
    }
}
