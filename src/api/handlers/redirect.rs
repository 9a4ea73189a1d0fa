//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The click is counted and the redirect target read in a single store
/// operation; nothing else happens on this path.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.link_service.resolve_redirect(&code).await?;

    tracing::debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}
