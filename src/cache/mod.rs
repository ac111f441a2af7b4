//! Cache Module
//!
//! Provides in-process caching with per-category TTL expiry, pattern
//! invalidation, stats accounting, and snapshot export/import.

mod clock;
mod entry;
mod snapshot;
mod stats;
mod store;
mod ttl_policy;

#[cfg(test)]
mod property_tests;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use snapshot::{Snapshot, SnapshotEntry};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_policy::{TtlPolicy, DEFAULT_FALLBACK_TTL_MS};

// == Shared Handle ==
/// The process-wide cache handle: one store behind a coarse lock,
/// constructed once at startup and passed to every component that
/// needs it.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store in the shared handle.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}

// == Get Or Set ==
/// Cache-aside read: returns the cached value for `key`, or on miss
/// invokes `fetcher`, stores its result, and returns it.
///
/// The lock is not held while the fetcher runs, only while committing
/// its result, so one slow fetch cannot block other cache traffic. If
/// the fetcher fails, the error propagates and nothing is stored.
pub async fn get_or_set<F, Fut>(
    cache: &SharedCache,
    key: &str,
    ttl_ms: Option<u64>,
    fetcher: F,
) -> Result<Value>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    if let Some(value) = cache.write().await.get(key) {
        return Ok(value);
    }

    let fetched = fetcher().await.map_err(|source| CacheError::FetchFailed {
        key: key.to_string(),
        source,
    })?;

    cache.write().await.set(key, fetched.clone(), ttl_ms)?;
    Ok(fetched)
}
