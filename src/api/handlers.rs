//! API Handlers
//!
//! HTTP request handlers for the operational cache endpoints.

use axum::{extract::State, Json};

use crate::cache::{shared, CacheStore, SharedCache, TtlPolicy};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CleanResponse, HealthResponse, InvalidateRequest, InvalidateResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the single process-wide cache handle; constructed once at
/// startup and cloned into every handler and middleware hook.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState wrapping the given cache store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            cache: shared(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the configured category table or fallback contains a
    /// zero TTL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let policy = TtlPolicy::new(config.categories.clone(), config.fallback_ttl_ms)?;
        Ok(Self::new(CacheStore::new(policy)))
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.cache.read().await;
    Json(StatsResponse::new(&store.stats()))
}

/// Handler for POST /clean
///
/// Triggers one sweep pass and reports how many expired entries it
/// removed.
pub async fn clean_handler(State(state): State<AppState>) -> Json<CleanResponse> {
    let mut store = state.cache.write().await;
    let deleted_count = store.cleanup_expired();

    Json(CleanResponse { deleted_count })
}

/// Handler for POST /invalidate
///
/// With a pattern, removes every key matching it; a malformed pattern
/// is a 400. Without a pattern (or without a body), clears the store.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    body: Option<Json<InvalidateRequest>>,
) -> Result<Json<InvalidateResponse>> {
    let pattern = body.and_then(|Json(req)| req.pattern);

    let mut store = state.cache.write().await;
    let deleted_count = match pattern {
        Some(pattern) => store.clear_pattern(&pattern)?,
        None => store.clear(),
    };

    Ok(Json(InvalidateResponse { deleted_count }))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(CacheStore::new(TtlPolicy::default()))
    }

    #[tokio::test]
    async fn test_stats_handler_reflects_operations() {
        let state = test_state();
        {
            let mut store = state.cache.write().await;
            store.set("tenant_list_default", json!([1]), None).unwrap();
            store.get("tenant_list_default");
            store.get("missing");
        }

        let Json(resp) = stats_handler(State(state)).await;
        assert_eq!(resp.hits, 1);
        assert_eq!(resp.misses, 1);
        assert_eq!(resp.sets, 1);
        assert_eq!(resp.size, 1);
        assert_eq!(resp.hit_rate, 50.0);
    }

    #[tokio::test]
    async fn test_invalidate_handler_with_pattern() {
        let state = test_state();
        {
            let mut store = state.cache.write().await;
            store.set("tenant_5_profile", json!(1), None).unwrap();
            store.set("tenant_9_profile", json!(2), None).unwrap();
        }

        let body = Some(Json(InvalidateRequest {
            pattern: Some("^tenant_5_".to_string()),
        }));
        let Json(resp) = invalidate_handler(State(state.clone()), body).await.unwrap();

        assert_eq!(resp.deleted_count, 1);
        assert_eq!(state.cache.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_handler_without_pattern_clears_all() {
        let state = test_state();
        {
            let mut store = state.cache.write().await;
            store.set("a", json!(1), None).unwrap();
            store.set("b", json!(2), None).unwrap();
        }

        let Json(resp) = invalidate_handler(State(state.clone()), None).await.unwrap();

        assert_eq!(resp.deleted_count, 2);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_handler_bad_pattern() {
        let state = test_state();

        let body = Some(Json(InvalidateRequest {
            pattern: Some("tenant_[".to_string()),
        }));
        let result = invalidate_handler(State(state), body).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clean_handler_counts_expired() {
        use crate::cache::ManualClock;
        use std::sync::Arc;

        let clock = Arc::new(ManualClock::new(1_000_000));
        let state = AppState {
            cache: shared(CacheStore::with_clock(TtlPolicy::default(), clock.clone())),
        };
        {
            let mut store = state.cache.write().await;
            store.set("short", json!(1), Some(1_000)).unwrap();
            store.set("long", json!(2), Some(60_000)).unwrap();
        }
        clock.advance(2_000);

        let Json(resp) = clean_handler(State(state.clone())).await;
        assert_eq!(resp.deleted_count, 1);
        assert_eq!(state.cache.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(resp) = health_handler().await;
        assert_eq!(resp.status, "healthy");
    }
}
