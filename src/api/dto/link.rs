//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkFilter, LinkSort, SortOrder};

/// Request to create a short link.
///
/// A missing `longUrl` deserializes to an empty string so that it is reported
/// as an invalid URL rather than a malformed body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL must be at most 2048 characters"))]
    pub long_url: String,

    /// Optional custom short code.
    #[serde(default)]
    pub code: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url,
            short_code: link.short_code,
            click_count: link.click_count,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}

/// Response to a successful create: the link plus its public URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLinkResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub short_url: String,
}

/// Every link, in listing order.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Sort column accepted by `GET /api/links`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    ClickCount,
}

/// Sort direction accepted by `GET /api/links`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Query parameters for `GET /api/links`.
///
/// All fields are optional; with none set the listing is every link, newest first.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListLinksQuery {
    #[validate(length(max = 256))]
    pub search: Option<String>,
    pub sort: Option<SortField>,
    pub order: Option<SortDirection>,
}

impl From<ListLinksQuery> for LinkFilter {
    fn from(query: ListLinksQuery) -> Self {
        let sort = match query.sort {
            Some(SortField::ClickCount) => LinkSort::ClickCount,
            Some(SortField::CreatedAt) | None => LinkSort::CreatedAt,
        };
        let order = match query.order {
            Some(SortDirection::Asc) => SortOrder::Asc,
            Some(SortDirection::Desc) | None => SortOrder::Desc,
        };

        LinkFilter::default()
            .with_search(query.search)
            .with_order(sort, order)
    }
}
