use crate::counters::Counter;
use crate::random::UniformSource;

/// Largest exponent the counter can hold. State 9 is absorbing, so the
/// largest representable estimate is 2^8 = 256.
pub const MAX_EXPONENT: u8 = 9;

/// Morris approximate counter.
///
/// The whole state is one bounded exponent. An increment at state `k`
/// advances to `k + 1` with probability 2^(-k), so reaching state `k` takes
/// about 2^k real increments and the estimate `2^(k-1)` tracks the order of
/// magnitude of the true count while the state fits in four bits.
pub struct MorrisCounter<R: UniformSource> {
    source: R,
    exponent: u8,
}

impl<R: UniformSource> MorrisCounter<R> {
    pub fn new(source: R) -> Self {
        MorrisCounter {
            source,
            exponent: 0,
        }
    }

    pub fn exponent(&self) -> u8 {
        self.exponent
    }
}

impl<R: UniformSource> Counter for MorrisCounter<R> {
    fn increment(&mut self) {
        if self.exponent == MAX_EXPONENT {
            // Saturated: no draw is consumed.
            return;
        }
        let draw = self.source.next_uniform();
        // Threshold at state 0 is 1.0, so a fresh counter always advances.
        if draw < 2f64.powi(-(self.exponent as i32)) {
            self.exponent += 1;
        }
    }

    fn value(&self) -> u64 {
        if self.exponent == 0 {
            0
        } else {
            1 << (self.exponent - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedSource, SeededSource};

    #[test]
    fn fresh_counter_estimates_zero() {
        let counter = MorrisCounter::new(ScriptedSource::new(vec![0.5]));
        assert_eq!(counter.exponent(), 0);
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn first_increment_always_advances() {
        // 0.999 is below no threshold except the state-0 threshold of 1.0.
        let mut counter = MorrisCounter::new(ScriptedSource::new(vec![0.999]));
        counter.increment();
        assert_eq!(counter.exponent(), 1);
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn high_draws_never_advance_past_state_one() {
        let mut counter = MorrisCounter::new(ScriptedSource::new(vec![0.999]));
        for _ in 0..50 {
            counter.increment();
        }
        assert_eq!(counter.exponent(), 1);
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn exponent_is_monotone_and_bounded() {
        let mut counter = MorrisCounter::new(SeededSource::from_seed(42));
        let mut previous = counter.exponent();

        for _ in 0..10_000 {
            counter.increment();
            let current = counter.exponent();
            assert!(current >= previous);
            assert!(current <= MAX_EXPONENT);
            previous = current;
        }
    }

    #[test]
    fn saturation_is_absorbing() {
        // Draws of 0.0 advance on every increment until the bound.
        let mut counter = MorrisCounter::new(ScriptedSource::new(vec![0.0]));
        for _ in 0..MAX_EXPONENT {
            counter.increment();
        }
        assert_eq!(counter.exponent(), MAX_EXPONENT);
        assert_eq!(counter.value(), 256);

        for _ in 0..100 {
            counter.increment();
        }
        assert_eq!(counter.exponent(), MAX_EXPONENT);
        assert_eq!(counter.value(), 256);
    }

    #[test]
    fn estimate_doubles_per_state() {
        let mut counter = MorrisCounter::new(ScriptedSource::new(vec![0.0]));
        let mut expected = vec![0u64];
        expected.extend((0..MAX_EXPONENT as u32).map(|k| 1u64 << k));

        for (state, &value) in expected.iter().enumerate() {
            assert_eq!(counter.exponent() as usize, state);
            assert_eq!(counter.value(), value);
            counter.increment();
        }
    }

    #[test]
    fn mean_estimate_converges() {
        // After n increments the expected estimate is about (n + 1) / 2: the
        // chain satisfies E[2^exponent] = n + 1 and the reading is one state
        // below that at 2^(exponent - 1). The band around n/2 is generous to
        // absorb sampling noise and the slight drag from saturation.
        let n = 100u64;
        let runs = 10_000usize;
        let mut source = SeededSource::from_seed(1729);

        let mut total = 0u64;
        for _ in 0..runs {
            let mut counter = MorrisCounter::new(&mut source);
            for _ in 0..n {
                counter.increment();
            }
            total += counter.value();
        }

        let mean = total as f64 / runs as f64;
        assert!(
            (35.0..70.0).contains(&mean),
            "mean estimate {mean} strayed from n/2 = {}",
            n / 2
        );
    }
}
