//! TTL Policy Module
//!
//! Maps cache keys to default lifetimes via ordered category matching.

use crate::error::{CacheError, Result};

// == Duration Constants ==
const MINUTE_MS: u64 = 60_000;

/// Fallback TTL for keys that match no category: 5 minutes.
pub const DEFAULT_FALLBACK_TTL_MS: u64 = 5 * MINUTE_MS;

// == TTL Policy ==
/// Resolves a default TTL for a key by ordered substring matching
/// against a category table.
///
/// The table is checked in order and the first matching entry wins, so
/// earlier categories take precedence when a key could match several.
/// Resolution is pure: it consults neither the clock nor the store.
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    /// Ordered (substring, ttl_ms) pairs
    categories: Vec<(String, u64)>,
    /// TTL used when no category matches
    fallback_ttl_ms: u64,
}

impl TtlPolicy {
    // == Constructor ==
    /// Creates a policy from an ordered category table and a fallback.
    ///
    /// Rejects any zero duration: a zero TTL would store entries that
    /// are expired on arrival.
    pub fn new(categories: Vec<(String, u64)>, fallback_ttl_ms: u64) -> Result<Self> {
        if fallback_ttl_ms == 0 {
            return Err(CacheError::InvalidTtl(fallback_ttl_ms));
        }
        for (_, ttl_ms) in &categories {
            if *ttl_ms == 0 {
                return Err(CacheError::InvalidTtl(*ttl_ms));
            }
        }

        Ok(Self {
            categories,
            fallback_ttl_ms,
        })
    }

    // == Default Table ==
    /// The canonical category table for admin-panel aggregates.
    ///
    /// Higher-churn or cheaper-to-recompute data gets shorter TTLs;
    /// expensive aggregate analytics get longer ones; error and alert
    /// feeds get the shortest so they stay near-real-time.
    pub fn default_categories() -> Vec<(String, u64)> {
        [
            ("error_logs", MINUTE_MS),
            ("system_health", 2 * MINUTE_MS),
            ("performance_metrics", 3 * MINUTE_MS),
            ("tenant_list", 5 * MINUTE_MS),
            ("whatsapp_metrics", 5 * MINUTE_MS),
            ("activity_log", 5 * MINUTE_MS),
            ("tenant_profile", 10 * MINUTE_MS),
            ("storage_metrics", 10 * MINUTE_MS),
            ("global_analytics", 15 * MINUTE_MS),
            ("tenant_analytics", 20 * MINUTE_MS),
            ("system_settings", 30 * MINUTE_MS),
        ]
        .into_iter()
        .map(|(substr, ttl)| (substr.to_string(), ttl))
        .collect()
    }

    // == Resolve ==
    /// Returns the TTL for `key`: first category whose substring occurs
    /// in the key, else the fallback.
    pub fn resolve(&self, key: &str) -> u64 {
        self.categories
            .iter()
            .find(|(substr, _)| key.contains(substr.as_str()))
            .map(|(_, ttl_ms)| *ttl_ms)
            .unwrap_or(self.fallback_ttl_ms)
    }

    /// Returns the fallback TTL.
    pub fn fallback_ttl_ms(&self) -> u64 {
        self.fallback_ttl_ms
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            categories: Self::default_categories(),
            fallback_ttl_ms: DEFAULT_FALLBACK_TTL_MS,
        }
    }
}
