//! Configuration Module
//!
//! Handles loading cache and server configuration from environment
//! variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{TtlPolicy, DEFAULT_FALLBACK_TTL_MS};

/// Default sweeper interval: 5 minutes.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 300_000;

/// Cache layer configuration.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Sweeper interval in milliseconds
    pub sweep_interval_ms: u64,
    /// TTL for keys matching no category, in milliseconds
    pub fallback_ttl_ms: u64,
    /// Ordered (substring, ttl_ms) category table
    pub categories: Vec<(String, u64)>,
    /// Optional snapshot file for graceful-restart migration
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL_MS` - Sweeper interval (default: 300000)
    /// - `FALLBACK_TTL_MS` - Fallback TTL (default: 300000)
    /// - `TTL_CATEGORIES` - Comma-separated `substring=ttl_ms` pairs
    ///   overriding the built-in category table; list order is table
    ///   order (default: built-in table)
    /// - `SNAPSHOT_PATH` - Snapshot file path (default: none)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval_ms: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_MS),
            fallback_ttl_ms: env::var("FALLBACK_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FALLBACK_TTL_MS),
            categories: env::var("TTL_CATEGORIES")
                .ok()
                .and_then(|v| parse_categories(&v))
                .unwrap_or_else(TtlPolicy::default_categories),
            snapshot_path: env::var("SNAPSHOT_PATH").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            fallback_ttl_ms: DEFAULT_FALLBACK_TTL_MS,
            categories: TtlPolicy::default_categories(),
            snapshot_path: None,
        }
    }
}

/// Parses a `substring=ttl_ms` comma list, preserving order.
///
/// Returns None if any pair is malformed, so a bad override falls back
/// to the built-in table instead of silently dropping entries.
fn parse_categories(raw: &str) -> Option<Vec<(String, u64)>> {
    raw.split(',')
        .map(|pair| {
            let (substr, ttl) = pair.split_once('=')?;
            let substr = substr.trim();
            if substr.is_empty() {
                return None;
            }
            Some((substr.to_string(), ttl.trim().parse().ok()?))
        })
        .collect()
}
