//! Snapshot Module
//!
//! Serializable point-in-time view of the cache, used for graceful
//! restart migration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheStats;

// == Snapshot Entry ==
/// One live cache entry with its remaining lifetime.
///
/// The remaining TTL, not the original one, is exported so that an
/// entry imported after a restart expires at roughly the same wall
/// time it would have originally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub value: Value,
    pub remaining_ttl_ms: u64,
}

// == Snapshot ==
/// A full consistent export of the cache: all live entries plus a copy
/// of the stats counters at export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<SnapshotEntry>,
    pub stats: CacheStats,
}
