//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkFilter, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistent store of short links, keyed by short code.
///
/// Implementations must enforce short-code uniqueness themselves (a unique
/// constraint, not a prior lookup) and perform click increments as a single
/// atomic operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Lists links matching `filter`.
    ///
    /// With [`LinkFilter::default`] this returns every link ordered by
    /// `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: &LinkFilter) -> Result<Vec<Link>, AppError>;

    /// Deletes a link by its short code.
    ///
    /// Returns `Ok(true)` if a row was removed and `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Records one click and returns the long URL to redirect to.
    ///
    /// Increments `click_count` and sets `last_clicked_at` to now in one
    /// statement. Returns `Ok(None)` if no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_click(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `click_count` over all links.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
