//! Cache Statistics Module
//!
//! Tracks where facade reads were answered from and how often the remote
//! tier failed.

// == Cache Stats ==
/// Tracks facade performance metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Reads answered from the volatile index
    pub memory_hits: u64,
    /// Reads answered by the remote tier
    pub remote_hits: u64,
    /// Reads that found nothing fresh in either tier
    pub misses: u64,
    /// Remote requests that failed in transport
    pub remote_failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the overall hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    /// Reads that failed in transport count as misses.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.memory_hits + self.remote_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    pub fn record_memory_hit(&mut self) {
        self.memory_hits += 1;
    }

    pub fn record_remote_hit(&mut self) {
        self.remote_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_remote_failure(&mut self) {
        self.remote_failures += 1;
    }
}
