//! Sweeper Task
//!
//! Background task that periodically removes expired cache entries, so
//! memory is reclaimed even for keys nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a recurring task that sweeps expired entries from the cache.
///
/// The task sleeps for `interval_ms` between passes and takes the
/// store's write lock only for the duration of each sweep. Each pass
/// performs the same expiry check a lazy `get` would, eagerly.
///
/// Returns a JoinHandle used to abort the task during graceful
/// shutdown. Spawning twice just creates a second independent timer;
/// both operate on the same store under the same lock.
pub fn spawn_sweeper(cache: SharedCache, interval_ms: u64) -> JoinHandle<()> {
    let interval = Duration::from_millis(interval_ms);

    tokio::spawn(async move {
        info!("Starting cache sweeper with interval of {} ms", interval_ms);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store = cache.write().await;
                store.cleanup_expired()
            };

            if removed > 0 {
                info!("Sweep removed {} expired entries", removed);
            } else {
                debug!("Sweep found no expired entries");
            }
        }
    })
}
