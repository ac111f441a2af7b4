//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and timing metadata.
///
/// Entries are never mutated in place; a `set` on an existing key fully
/// replaces the prior entry, including its TTL and timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value; the cache never interprets it
    pub value: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Lifetime in milliseconds from `stored_at`; always positive
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now_ms`.
    ///
    /// The caller is responsible for rejecting a zero TTL before
    /// constructing an entry.
    pub fn new(value: Value, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now_ms`.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to `stored_at + ttl_ms`, so an entry whose
    /// TTL has fully elapsed is immediately invisible to readers.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.stored_at.saturating_add(self.ttl_ms)
    }

    // == Remaining TTL ==
    /// Returns remaining lifetime in milliseconds as of `now_ms`,
    /// or 0 if the entry has already expired.
    pub fn remaining_ttl_ms(&self, now_ms: u64) -> u64 {
        self.stored_at
            .saturating_add(self.ttl_ms)
            .saturating_sub(now_ms)
    }
}
