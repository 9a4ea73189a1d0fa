//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkFilter, LinkSort, NewLink, SortOrder};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

const LINK_COLUMNS: &str = "id, long_url, short_code, click_count, last_clicked_at, created_at";

/// Row shape of the `links` table.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    long_url: String,
    short_code: String,
    click_count: i64,
    last_clicked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.long_url,
            r.short_code,
            r.click_count,
            r.last_clicked_at,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// All statements use bound parameters; the only interpolated SQL is the
/// `ORDER BY` clause, which is built from closed enums.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Builds the `ORDER BY` clause for a listing.
///
/// `id` breaks ties so that links created in the same instant keep insertion order.
fn order_clause(sort: LinkSort, order: SortOrder) -> &'static str {
    match (sort, order) {
        (LinkSort::CreatedAt, SortOrder::Desc) => "ORDER BY created_at DESC, id DESC",
        (LinkSort::CreatedAt, SortOrder::Asc) => "ORDER BY created_at ASC, id ASC",
        (LinkSort::ClickCount, SortOrder::Desc) => "ORDER BY click_count DESC, id DESC",
        (LinkSort::ClickCount, SortOrder::Asc) => "ORDER BY click_count ASC, id ASC",
    }
}

/// Turns a search term into an `ILIKE` pattern, escaping wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (long_url, short_code) VALUES ($1, $2) RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.long_url)
            .bind(&new_link.short_code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_code(&e) {
                    AppError::DuplicateCode {
                        code: new_link.short_code.clone(),
                    }
                } else {
                    e.into()
                }
            })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self, filter: &LinkFilter) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE ($1::text IS NULL OR short_code ILIKE $1 OR long_url ILIKE $1)
            {}
            "#,
            order_clause(filter.sort, filter.order)
        );

        let pattern = filter.search.as_deref().map(like_pattern);

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(pattern)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_click(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let long_url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET click_count = click_count + 1,
                last_clicked_at = NOW()
            WHERE short_code = $1
            RETURNING long_url
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(long_url)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(click_count), 0)::bigint FROM links")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(total)
    }
}
