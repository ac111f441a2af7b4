//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
///
/// Errors are always returned to the direct caller; the cache never
/// logs and swallows them on the caller's behalf.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Malformed invalidation pattern; no entries were touched
    #[error("Invalid invalidation pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Non-positive TTL supplied explicitly or via configuration
    #[error("TTL must be a positive number of milliseconds, got {0}")]
    InvalidTtl(u64),

    /// A caller-supplied fetcher failed; nothing was cached
    #[error("Fetch failed for key '{key}'")]
    FetchFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidPattern { .. } => StatusCode::BAD_REQUEST,
            CacheError::InvalidTtl(_) => StatusCode::BAD_REQUEST,
            CacheError::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
