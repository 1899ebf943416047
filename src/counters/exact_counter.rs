use crate::counters::Counter;

/// Plain integer counter, the ground truth the approximate counter is
/// measured against.
#[derive(Debug, Default)]
pub struct ExactCounter {
    count: u64,
}

impl ExactCounter {
    pub fn new() -> Self {
        ExactCounter::default()
    }
}

impl Counter for ExactCounter {
    fn increment(&mut self) {
        self.count += 1;
    }

    fn value(&self) -> u64 {
        self.count
    }
}
