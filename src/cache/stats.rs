//! Cache Statistics Module
//!
//! Tracks cache performance counters: hits, misses, sets, and deletes.

use serde::{Deserialize, Serialize};

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// The counters are monotonic for the process lifetime; `size` is not a
/// counter and always mirrors the store's actual entry count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of reads satisfied from cache
    pub hits: u64,
    /// Number of reads that found nothing, or only an expired entry
    pub misses: u64,
    /// Number of entries stored (including overwrites)
    pub sets: u64,
    /// Number of entries removed by explicit delete or invalidation
    pub deletes: u64,
    /// Current number of live entries in the cache
    pub size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate as a percentage.
    ///
    /// Returns 100.0 before any reads have occurred: nothing has missed
    /// yet, and it avoids dividing by zero.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            100.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Set ==
    /// Increments the sets counter.
    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    // == Record Deletes ==
    /// Increments the deletes counter by the number of entries removed.
    pub fn record_deletes(&mut self, count: u64) {
        self.deletes += count;
    }

    // == Update Entry Count ==
    /// Updates the live entry count.
    pub fn set_size(&mut self, count: usize) {
        self.size = count;
    }
}
