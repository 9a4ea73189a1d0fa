//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`   - Short link redirect (public)
//! - `GET  /healthz`  - Liveness check (public)
//! - `/api/links*`    - Link management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline, `408` when exceeded
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **CORS** - Optional, for a browser dashboard on another origin
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, rate_limit, timeout, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// HTTP-level settings for [`app_router`].
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout_seconds: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub cors_origin: Option<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            rate_limit_per_second: 2,
            rate_limit_burst: 100,
            cors_origin: None,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// The redirect and health routes are not rate limited. The rate limiter
/// needs the peer address, so serve the router with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if the rate limit or CORS settings are invalid.
pub fn app_router(state: AppState, settings: &RouterSettings) -> Result<NormalizePath<Router>> {
    let mut api_router = api::routes::link_routes().layer(rate_limit::layer(
        settings.rate_limit_per_second,
        settings.rate_limit_burst,
    )?);

    if let Some(origin) = &settings.cors_origin {
        api_router = api_router.layer(cors::layer(origin)?);
    }

    let router = Router::new()
        .route("/healthz", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(timeout::layer(settings.request_timeout_seconds))
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
