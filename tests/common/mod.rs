#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tinylink::application::services::{AllocationPolicy, LinkService};
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (short_code, long_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_clicked_link(pool: &PgPool, code: &str, url: &str, clicks: i64) {
    sqlx::query(
        "INSERT INTO links (short_code, long_url, click_count, last_clicked_at) VALUES ($1, $2, $3, NOW())",
    )
    .bind(code)
    .bind(url)
    .bind(clicks)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_policy(pool, AllocationPolicy::default())
}

pub fn create_test_state_with_policy(pool: PgPool, policy: AllocationPolicy) -> AppState {
    let link_repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::with_policy(link_repo, policy));

    AppState::new(link_service, TEST_BASE_URL)
}
