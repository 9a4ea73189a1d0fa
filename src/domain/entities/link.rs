//! Link entity representing a short code to long URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with click metadata.
///
/// `short_code` and `created_at` never change after creation; `click_count`
/// and `last_clicked_at` are only touched by redirects.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_code: String,
        click_count: i64,
        last_clicked_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            short_code,
            click_count,
            last_clicked_at,
            created_at,
        }
    }

    /// Returns true if the link has been visited at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub short_code: String,
}

/// Column a link listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkSort {
    #[default]
    CreatedAt,
    ClickCount,
}

/// Direction of a link listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter and ordering for link listings.
///
/// The default filter lists every link, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    /// Case-insensitive substring matched against the code and the long URL.
    pub search: Option<String>,
    pub sort: LinkSort,
    pub order: SortOrder,
}

impl LinkFilter {
    /// Restricts the listing to links whose code or URL contains `term`.
    ///
    /// Blank terms are ignored.
    pub fn with_search(mut self, term: Option<String>) -> Self {
        self.search = term
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// Sets the sort column and direction.
    pub fn with_order(mut self, sort: LinkSort, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }
}
