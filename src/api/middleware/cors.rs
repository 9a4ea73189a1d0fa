//! CORS middleware for the browser dashboard.

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Allows the dashboard served from `origin` to call the API.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("Invalid CORS origin '{origin}'"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
