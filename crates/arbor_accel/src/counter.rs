//! Diagnostic counter of primitive-level intersection tests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts how many primitive intersection tests an aggregate performed.
///
/// Relaxed atomics keep the count exact when queries run on several
/// threads; no other memory is synchronised through it.
#[derive(Debug, Default)]
pub struct IntersectionCounter {
    count: AtomicU64,
}

impl IntersectionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single primitive test.
    #[inline]
    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Zero the counter, returning the count it held.
    pub fn reset(&self) -> u64 {
        self.count.swap(0, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_counter_record_and_reset() {
        let counter = IntersectionCounter::new();
        counter.record();
        counter.record();

        assert_eq!(counter.get(), 2);
        assert_eq!(counter.reset(), 2);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_counter_exact_across_threads() {
        let counter = IntersectionCounter::new();
        (0..10_000).into_par_iter().for_each(|_| counter.record());
        assert_eq!(counter.get(), 10_000);
    }
}
