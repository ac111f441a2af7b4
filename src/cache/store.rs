//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiry, category
//! TTL policies, pattern invalidation, and snapshot export/import.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, Clock, Snapshot, SnapshotEntry, SystemClock, TtlPolicy};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with per-entry TTL expiry.
///
/// The store owns all entries exclusively and performs no I/O. Callers
/// share it behind a lock; every method that can observe or remove an
/// expired entry takes `&mut self` so lazy expiry happens under the
/// same exclusion as any other mutation.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Default TTL resolution for keys stored without an explicit TTL
    policy: TtlPolicy,
    /// Performance statistics
    stats: CacheStats,
    /// Time source; injected so tests control expiry deterministically
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructors ==
    /// Creates a new CacheStore using the system clock.
    pub fn new(policy: TtlPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore with an explicit clock.
    pub fn with_clock(policy: TtlPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if present and not expired; reads never extend
    /// an entry's lifetime. An expired entry is removed on the spot and
    /// the read counts as a miss, same as an absent key.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now_ms = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now_ms) => {
                // Lazy expiry: drop the stale entry before reporting the miss
                self.entries.remove(key);
                self.stats.set_size(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// When `ttl_ms` is omitted the TTL policy resolves one from the
    /// key's category. An existing entry under the same key is fully
    /// replaced, including its TTL and timestamp.
    pub fn set(&mut self, key: &str, value: Value, ttl_ms: Option<u64>) -> Result<()> {
        let effective_ttl = match ttl_ms {
            Some(0) => return Err(CacheError::InvalidTtl(0)),
            Some(ttl) => ttl,
            None => self.policy.resolve(key),
        };

        let entry = CacheEntry::new(value, self.clock.now_ms(), effective_ttl);
        self.entries.insert(key.to_string(), entry);

        self.stats.record_set();
        self.stats.set_size(self.entries.len());
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether anything was removed; the deletes counter only
    /// moves on actual removal.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_deletes(1);
            self.stats.set_size(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes all entries, returning the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();

        self.stats.record_deletes(count as u64);
        self.stats.set_size(0);
        count
    }

    // == Clear Pattern ==
    /// Removes every entry whose key matches the given regular
    /// expression, returning the number removed.
    ///
    /// A malformed pattern is an error and no entries are touched.
    /// Write-path handlers use this to invalidate, e.g., everything
    /// under a `tenant_5_` prefix after a tenant mutation.
    pub fn clear_pattern(&mut self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern).map_err(|source| CacheError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let matched_keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| regex.is_match(key))
            .cloned()
            .collect();

        for key in &matched_keys {
            self.entries.remove(key);
        }

        let count = matched_keys.len();
        self.stats.record_deletes(count as u64);
        self.stats.set_size(self.entries.len());
        Ok(count)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning the number removed.
    ///
    /// Same expiry check as a lazy `get`, performed eagerly so memory
    /// is reclaimed for keys nobody reads again. Expiry is not an
    /// explicit invalidation, so the deletes counter does not move.
    pub fn cleanup_expired(&mut self) -> usize {
        let now_ms = self.clock.now_ms();

        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        self.stats.set_size(self.entries.len());
        expired_keys.len()
    }

    // == Export ==
    /// Produces a consistent point-in-time snapshot of all live
    /// entries, each with its remaining lifetime, plus a stats copy.
    ///
    /// Entries already past their deadline but not yet swept are
    /// excluded. Consistency comes from the caller holding the store's
    /// lock for the duration of the call.
    pub fn export(&self) -> Snapshot {
        let now_ms = self.clock.now_ms();

        let entries = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now_ms))
            .map(|(key, entry)| SnapshotEntry {
                key: key.clone(),
                value: entry.value.clone(),
                remaining_ttl_ms: entry.remaining_ttl_ms(now_ms),
            })
            .collect();

        Snapshot {
            entries,
            stats: self.stats.clone(),
        }
    }

    // == Import ==
    /// Clears the store, then inserts each snapshot entry using its
    /// remaining TTL as the new TTL, with the import moment as the new
    /// insertion timestamp.
    ///
    /// An entry with zero remaining TTL is rejected before anything is
    /// inserted; the clear still happened by then, matching "clear then
    /// load" migration semantics.
    pub fn import(&mut self, entries: Vec<SnapshotEntry>) -> Result<()> {
        self.clear();

        for entry in &entries {
            if entry.remaining_ttl_ms == 0 {
                return Err(CacheError::InvalidTtl(0));
            }
        }

        let now_ms = self.clock.now_ms();
        for entry in entries {
            self.entries.insert(
                entry.key,
                CacheEntry::new(entry.value, now_ms, entry.remaining_ttl_ms),
            );
            self.stats.record_set();
        }

        self.stats.set_size(self.entries.len());
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
