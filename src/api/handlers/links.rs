//! Handlers for link management endpoints (create, list, inspect, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, CreatedLinkResponse, LinkListResponse, LinkResponse, ListLinksQuery,
    MessageResponse,
};
use crate::domain::entities::LinkFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/some/page",
///   "code": "promo1"   // optional, 3-8 alphanumeric characters
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "longUrl": "https://example.com/some/page",
///   "shortCode": "promo1",
///   "shortUrl": "http://localhost:3000/promo1",
///   "clickCount": 0,
///   "lastClickedAt": null,
///   "createdAt": "2026-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an invalid URL, invalid code, or malformed body
/// - 409 Conflict if the custom code is already taken
/// - 500 Internal Server Error if no free random code was found
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedLinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&payload.long_url, payload.code.as_deref())
        .await?;

    tracing::info!(code = %link.short_code, "Short link created");

    let short_url = state
        .link_service
        .get_short_url(&state.base_url, &link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(CreatedLinkResponse {
            link: link.into(),
            short_url,
        }),
    ))
}

/// Lists links, newest first by default.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Query Parameters
///
/// - `search` - case-insensitive substring of the code or the long URL
/// - `sort` - `createdAt` (default) or `clickCount`
/// - `order` - `desc` (default) or `asc`
pub async fn list_links_handler(
    State(state): State<AppState>,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<LinkListResponse>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let filter = LinkFilter::from(query);
    let links = state.link_service.list_links(&filter).await?;

    Ok(Json(LinkListResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Returns a single link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// Idempotent: deleting an unknown code also returns `200 OK`.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(MessageResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
