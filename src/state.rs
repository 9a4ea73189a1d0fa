//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Instant;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::PgLinkRepository;

/// Link service backed by PostgreSQL.
pub type PgLinkService = LinkService<PgLinkRepository>;

/// State built once in [`crate::server::run`] and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<PgLinkService>,
    /// Public prefix of short URLs, without trailing slash.
    pub base_url: Arc<str>,
    /// Process start, used to report uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Creates the application state.
    pub fn new(link_service: Arc<PgLinkService>, base_url: &str) -> Self {
        Self {
            link_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            started_at: Instant::now(),
        }
    }
}
