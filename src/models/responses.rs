//! Response DTOs for the operational API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries stored
    pub sets: u64,
    /// Number of entries explicitly removed
    pub deletes: u64,
    /// Current number of live entries
    pub size: usize,
    /// Hit rate percentage (100 before any reads)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            sets: stats.sets,
            deletes: stats.deletes,
            size: stats.size,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the clean endpoint (POST /clean)
#[derive(Debug, Clone, Serialize)]
pub struct CleanResponse {
    /// Number of expired entries removed by the sweep pass
    pub deleted_count: usize,
}

/// Response body for the invalidate endpoint (POST /invalidate)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Number of entries removed
    pub deleted_count: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_serialize() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            sets: 2,
            deletes: 0,
            size: 2,
        };
        let resp = StatsResponse::new(&stats);
        assert_eq!(resp.hit_rate, 75.0);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"hits\":3"));
        assert!(json.contains("hit_rate"));
    }

    #[test]
    fn test_stats_response_no_reads() {
        let resp = StatsResponse::new(&CacheStats::new());
        assert_eq!(resp.hit_rate, 100.0);
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse { deleted_count: 4 };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"deleted_count\":4"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
