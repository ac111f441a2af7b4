//! Request DTOs for the operational API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the invalidate operation (POST /invalidate)
///
/// With a pattern, every key matching the regular expression is
/// removed; without one, the entire store is cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    /// Optional regular expression matched against live keys
    #[serde(default)]
    pub pattern: Option<String>,
}
