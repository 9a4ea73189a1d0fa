mod common;

use axum::{
    Router,
    http::{StatusCode, header},
    routing::{get, post},
};
use axum_test::TestServer;
use sqlx::PgPool;
use tinylink::api::handlers::{create_link_handler, get_link_handler, redirect_handler};

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/api/links", post(create_link_handler))
        .route("/api/links/{code}", get(get_link_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "test123", "https://example.com/target").await;
    let server = make_server(pool);

    let response = server.get("/test123").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/target"
    );
}

#[sqlx::test]
async fn test_created_link_redirects(pool: PgPool) {
    let server = make_server(pool);

    let created = server
        .post("/api/links")
        .json(&serde_json::json!({ "longUrl": "  https://example.com/a%20b?q=1#top \n" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let code = created.json::<serde_json::Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/a%20b?q=1#top"
    );
}

#[sqlx::test]
async fn test_redirect_counts_clicks(pool: PgPool) {
    common::create_test_link(&pool, "count1", "https://example.com").await;
    let server = make_server(pool.clone());

    for _ in 0..3 {
        server
            .get("/count1")
            .await
            .assert_status(StatusCode::FOUND);
    }

    assert_eq!(common::click_count(&pool, "count1").await, 3);

    let body = server
        .get("/api/links/count1")
        .await
        .json::<serde_json::Value>();
    assert_eq!(body["clickCount"], 3);
    assert!(body["lastClickedAt"].is_string());
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = make_server(pool.clone());

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
    assert!(response.headers().get(header::LOCATION).is_none());
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_redirect_is_case_sensitive(pool: PgPool) {
    common::create_test_link(&pool, "AbCdEf", "https://example.com").await;
    let server = make_server(pool.clone());

    server.get("/abcdef").await.assert_status_not_found();
    assert_eq!(common::click_count(&pool, "AbCdEf").await, 0);
}

#[sqlx::test]
async fn test_redirect_after_delete(pool: PgPool) {
    common::create_test_link(&pool, "gone01", "https://example.com").await;
    sqlx::query("DELETE FROM links WHERE short_code = $1")
        .bind("gone01")
        .execute(&pool)
        .await
        .unwrap();
    let server = make_server(pool);

    server.get("/gone01").await.assert_status_not_found();
}
