/// Minimal capability shared by exact and approximate counters: bump the
/// count, read the current value (exact count or estimate).
pub trait Counter {
    fn increment(&mut self);
    fn value(&self) -> u64;
}

/// Strict comparison of two counter readings. Ties are not "greater".
pub fn is_greater(a: u64, b: u64) -> bool {
    a > b
}
