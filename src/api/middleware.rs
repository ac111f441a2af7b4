//! Cache Middleware
//!
//! The two hooks the request pipeline mounts around its route handlers:
//! a cache-aside read hook that short-circuits GET requests on a hit,
//! and an invalidate-on-write hook that drops stale entries after a
//! successful mutation.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, warn};

use super::handlers::AppState;

/// Response header reporting whether the cache served the request.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Request header overriding the derived cache key.
pub const CACHE_KEY_HEADER: &str = "x-cache-key";

// == Invalidation Scope ==
/// Pattern bound to a route group, matched against cache keys after a
/// successful write through that group.
///
/// Mounted as a request extension, e.g.
/// `.layer(Extension(InvalidationScope::new("^tenant_")))` outside the
/// `invalidate_on_write` layer.
#[derive(Debug, Clone)]
pub struct InvalidationScope(pub String);

impl InvalidationScope {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }
}

// == Cache-Aside Read Hook ==
/// Serves GET requests from the cache when possible.
///
/// The key is the `x-cache-key` header when present, otherwise derived
/// from method and path. On a hit the downstream handler never runs and
/// the response carries `x-cache: HIT`. On a miss the downstream
/// response is stored only if its status is 2xx and its body is JSON,
/// under a TTL resolved from the key's category; the response is marked
/// `x-cache: MISS`. Non-GET requests pass through untouched.
pub async fn cache_aside(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = cache_key(&req);

    if let Some(value) = state.cache.write().await.get(&key) {
        debug!("Cache hit for '{}'", key);
        let mut response = axum::Json(value).into_response();
        response
            .headers_mut()
            .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("HIT"));
        return response;
    }

    let response = next.run(req).await;

    // Only successful outcomes are cached
    if !response.status().is_success() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to buffer response body for '{}': {}", key, err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) => {
            if let Err(err) = state.cache.write().await.set(&key, value, None) {
                warn!("Failed to cache response for '{}': {}", key, err);
            }
        }
        Err(_) => debug!("Response for '{}' is not JSON, skipping cache", key),
    }

    parts
        .headers
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

// == Invalidate-On-Write Hook ==
/// Invalidates cache entries after a successful mutation.
///
/// Reads the route group's [`InvalidationScope`] from request
/// extensions; after the downstream handler returns a 2xx response,
/// clears every cache key matching the scope's pattern. Failed writes
/// never invalidate: stale data beats discarding a cache that may still
/// be correct. A malformed configured pattern is logged rather than
/// failing a write that already succeeded.
pub async fn invalidate_on_write(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let scope = req.extensions().get::<InvalidationScope>().cloned();
    let response = next.run(req).await;

    if let Some(InvalidationScope(pattern)) = scope {
        if response.status().is_success() {
            match state.cache.write().await.clear_pattern(&pattern) {
                Ok(removed) => debug!("Invalidated {} entries matching '{}'", removed, pattern),
                Err(err) => warn!("Invalidation skipped: {}", err),
            }
        }
    }

    response
}

// == Key Derivation ==
/// Derives the cache key for a request: explicit `x-cache-key` header,
/// else method and path.
fn cache_key(req: &Request) -> String {
    req.headers()
        .get(CACHE_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("{} {}", req.method(), req.uri().path()))
}
