//! Link lifecycle service and short code allocation.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkFilter, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::validation::{validate_short_code, validate_url};
use serde_json::json;

/// Parameters of the random code allocation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// Length of generated codes (6-8).
    pub code_length: usize,
    /// Upper bound on generate-and-check cycles before giving up.
    pub max_attempts: usize,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            code_length: 6,
            max_attempts: 5,
        }
    }
}

/// Aggregate figures over the whole link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSummary {
    pub links: i64,
    pub clicks: i64,
}

/// Service for creating, resolving and deleting short links.
///
/// Owns the allocation policy: a caller-supplied code is used as-is or
/// rejected, a random code is retried a bounded number of times. The
/// existence probe before each insert only avoids needless writes; the
/// store's unique constraint is what actually guarantees uniqueness.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    policy: AllocationPolicy,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service with the default allocation policy.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_policy(link_repository, AllocationPolicy::default())
    }

    /// Creates a new link service with a custom allocation policy.
    ///
    /// A policy of zero attempts is raised to one, so random allocation always
    /// tries at least one candidate.
    pub fn with_policy(link_repository: Arc<L>, policy: AllocationPolicy) -> Self {
        Self {
            link_repository,
            policy: AllocationPolicy {
                max_attempts: policy.max_attempts.max(1),
                ..policy
            },
        }
    }

    /// Returns the allocation policy in use.
    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `long_url` - The original URL (trimmed and validated)
    /// - `custom_code` - Optional custom short code; an empty string counts as absent
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is invalid
    /// - [`AppError::InvalidCode`] if the custom code is invalid (the store is not touched)
    /// - [`AppError::CodeConflict`] if the custom code is already taken
    /// - [`AppError::AllocationExhausted`] if every random candidate collided
    pub async fn create_link(
        &self,
        long_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        let long_url = validate_url(long_url)?;

        match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => self.create_with_custom_code(long_url, custom).await,
            None => self.create_with_random_code(long_url).await,
        }
    }

    /// Uses the caller's code or fails. Never retries.
    async fn create_with_custom_code(
        &self,
        long_url: String,
        custom_code: &str,
    ) -> Result<Link, AppError> {
        let short_code = validate_short_code(custom_code)?;

        if self
            .link_repository
            .find_by_code(&short_code)
            .await?
            .is_some()
        {
            return Err(AppError::code_conflict(short_code));
        }

        let new_link = NewLink {
            long_url,
            short_code,
        };

        match self.link_repository.create(new_link).await {
            Err(AppError::DuplicateCode { code }) => {
                tracing::debug!(code = %code, "Custom code taken by a concurrent request");
                Err(AppError::code_conflict(code))
            }
            result => result,
        }
    }

    /// Generates candidates until one is stored or the attempt cap is reached.
    ///
    /// A collision at the probe and a unique violation at insert both consume
    /// one attempt.
    async fn create_with_random_code(&self, long_url: String) -> Result<Link, AppError> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            let short_code = generate_code(self.policy.code_length).map_err(|e| {
                tracing::error!(error = %e, "Short code generator is misconfigured");
                AppError::internal("Internal error", json!({}))
            })?;

            if self
                .link_repository
                .find_by_code(&short_code)
                .await?
                .is_some()
            {
                tracing::debug!(attempt, code = %short_code, "Random code collided");
                continue;
            }

            let new_link = NewLink {
                long_url: long_url.clone(),
                short_code,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::DuplicateCode { code }) => {
                    tracing::debug!(attempt, code = %code, "Random code taken by a concurrent request");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(max_attempts, "Short code allocation exhausted");

        Err(AppError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    /// Lists links matching a search/sort filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, filter: &LinkFilter) -> Result<Vec<Link>, AppError> {
        self.link_repository.list(filter).await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, short_code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "code": short_code }))
            })
    }

    /// Deletes a link. Deleting an unknown code succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_link(&self, short_code: &str) -> Result<(), AppError> {
        let removed = self.link_repository.delete_by_code(short_code).await?;

        if removed {
            tracing::info!(code = short_code, "Link deleted");
        } else {
            tracing::debug!(code = short_code, "Delete of unknown code ignored");
        }

        Ok(())
    }

    /// Counts a click and returns the redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve_redirect(&self, short_code: &str) -> Result<String, AppError> {
        self.link_repository
            .increment_click(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "code": short_code }))
            })
    }

    /// Returns the number of links and the total number of clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<LinkSummary, AppError> {
        Ok(LinkSummary {
            links: self.link_repository.count().await?,
            clicks: self.link_repository.total_clicks().await?,
        })
    }

    /// Constructs the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_code)
    }
}
