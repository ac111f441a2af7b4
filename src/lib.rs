//! Tenant Cache - in-process caching for admin-panel aggregates
//!
//! Category-aware TTL cache with pattern invalidation, hit/miss
//! accounting, background sweeping, snapshot export/import, and
//! cache-aside middleware hooks.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{get_or_set, CacheStore, SharedCache, TtlPolicy};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweeper;
