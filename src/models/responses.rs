//! Response DTOs for the course catalog API
//!
//! Defines the structure of outgoing HTTP response bodies. Courses themselves
//! are returned as stored documents.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::StoreStats;

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
}

impl RootResponse {
    /// Describes the dataset lifecycle for a given TTL in seconds
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            message: format!(
                "CSV data is loaded into the course store with a TTL of {}.",
                describe_secs(ttl_secs)
            ),
        }
    }
}

fn describe_secs(secs: u64) -> String {
    match secs {
        s if s > 0 && s % 60 == 0 => {
            let minutes = s / 60;
            format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
        }
        s => format!("{} second{}", s, if s == 1 { "" } else { "s" }),
    }
}

/// Response body for the DELETE operation (DELETE /courses/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub detail: String,
    /// The id that was deleted
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            detail: "Course deleted successfully".to_string(),
            id: id.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of courses in the store
    pub total_courses: usize,
    /// Courses removed by TTL expiry since startup
    pub expired: u64,
    /// Number of full dataset loads since startup
    pub reloads: u64,
    /// When the dataset was last loaded
    pub last_reload_at: Option<DateTime<Utc>>,
    /// Record time-to-live in seconds
    pub ttl_seconds: u64,
}

impl StatsResponse {
    pub fn new(stats: StoreStats, ttl_seconds: u64) -> Self {
        Self {
            total_courses: stats.total_courses,
            expired: stats.expired,
            reloads: stats.reloads,
            last_reload_at: stats.last_reload_at,
            ttl_seconds,
        }
    }
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
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error kind, e.g. "not_found"
    pub error: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
