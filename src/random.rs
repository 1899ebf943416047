use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

/// A source of independent uniform draws from the half-open interval `[0, 1)`.
///
/// A draw of exactly 1.0 is a contract violation: every threshold comparison
/// downstream assumes the upper bound is exclusive.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Uniform source backed by `StdRng`.
///
/// Seeded construction yields the same draw sequence on every run of this
/// implementation, which is what the experiment relies on for reproducibility.
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        SeededSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SeededSource {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        let draw = self.rng.random::<f64>();
        // A broken generator must abort, not be clamped into a valid-looking
        // draw that corrupts the statistics.
        assert!(
            (0.0..1.0).contains(&draw),
            "uniform draw outside [0, 1): {draw}"
        );
        draw
    }
}

/// Cloneable handle to a single sequential draw stream.
///
/// Every clone draws from the same underlying source, so counters built from
/// clones of one handle exhaust one stream in call order.
pub struct SharedSource<S>(Rc<RefCell<S>>);

impl<S> SharedSource<S> {
    pub fn new(source: S) -> Self {
        SharedSource(Rc::new(RefCell::new(source)))
    }
}

impl<S> Clone for SharedSource<S> {
    fn clone(&self) -> Self {
        SharedSource(Rc::clone(&self.0))
    }
}

impl<S: UniformSource> UniformSource for SharedSource<S> {
    fn next_uniform(&mut self) -> f64 {
        self.0.borrow_mut().next_uniform()
    }
}

/// Replays a fixed sequence of draws, cycling once exhausted.
pub struct ScriptedSource {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        ScriptedSource { draws, next: 0 }
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}

/// Uniform index in `[0, bound)`, derived from one draw.
pub fn next_index(source: &mut impl UniformSource, bound: usize) -> usize {
    (source.next_uniform() * bound as f64) as usize
}

/// Uniform count in `[1, max]`, derived from one draw.
pub fn next_count(source: &mut impl UniformSource, max: u64) -> u64 {
    1 + (source.next_uniform() * max as f64) as u64
}
