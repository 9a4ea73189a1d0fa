//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Liveness report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the process started.
    pub uptime: f64,
}
