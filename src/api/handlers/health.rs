//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports liveness, build version and uptime.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T12:00:00Z",
///   "uptime": 42.5
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
