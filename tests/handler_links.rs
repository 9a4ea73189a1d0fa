mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use tinylink::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
};
use tinylink::application::services::AllocationPolicy;
use tinylink::state::AppState;

/// Build a test server with the link management routes.
///
/// The rate limiter is left out: it needs the peer address, which the
/// in-memory transport does not provide.
fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route(
            "/api/links",
            get(list_links_handler).post(create_link_handler),
        )
        .route(
            "/api/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .with_state(state);
    TestServer::new(app).unwrap()
}

fn server_for(pool: PgPool) -> TestServer {
    make_server(common::create_test_state(pool))
}

// ─── POST ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_link_random_code(pool: PgPool) {
    let server = server_for(pool.clone());

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let code = body["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["longUrl"], "https://example.com/page");
    assert_eq!(body["clickCount"], 0);
    assert!(body["lastClickedAt"].is_null());
    assert!(body["createdAt"].is_string());
    assert_eq!(
        body["shortUrl"],
        format!("{}/{}", common::TEST_BASE_URL, code)
    );

    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_link_custom_code(pool: PgPool) {
    let server = server_for(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com", "code": "promo1" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["shortCode"], "promo1");
    assert_eq!(body["shortUrl"], "http://sho.rt/promo1");
}

#[sqlx::test]
async fn test_create_link_trims_input(pool: PgPool) {
    let server = server_for(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "  https://example.com  ", "code": " abc " }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["longUrl"], "https://example.com");
    assert_eq!(body["shortCode"], "abc");
}

#[sqlx::test]
async fn test_create_link_empty_code_is_random(pool: PgPool) {
    let server = server_for(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com", "code": "" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["shortCode"].as_str().unwrap().len(),
        6
    );
}

#[sqlx::test]
async fn test_create_link_code_conflict(pool: PgPool) {
    common::create_test_link(&pool, "taken1", "https://first.com").await;
    let server = server_for(pool.clone());

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://second.com", "code": "taken1" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "code_conflict");
    assert_eq!(body["error"]["details"]["code"], "taken1");

    // The existing link is untouched
    assert_eq!(common::count_links(&pool).await, 1);
    let existing = server.get("/api/links/taken1").await.json::<Value>();
    assert_eq!(existing["longUrl"], "https://first.com");
}

#[sqlx::test]
async fn test_create_link_invalid_url(pool: PgPool) {
    let server = server_for(pool.clone());

    for url in ["not a url", "javascript:alert(1)", "/relative/path", "https://"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "longUrl": url }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_missing_url(pool: PgPool) {
    let server = server_for(pool);

    let response = server.post("/api/links").json(&json!({})).await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid_url");
    assert_eq!(body["error"]["message"], "URL is required");
}

#[sqlx::test]
async fn test_create_link_invalid_code(pool: PgPool) {
    let server = server_for(pool.clone());

    for code in ["ab", "toolong99", "bad-cd", "héllo", "api"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com", "code": code }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_code");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_malformed_json(pool: PgPool) {
    let server = server_for(pool);

    let response = server
        .post("/api/links")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
}

#[sqlx::test]
async fn test_create_link_zero_attempt_policy_still_allocates(pool: PgPool) {
    let policy = AllocationPolicy {
        code_length: 6,
        max_attempts: 0,
    };
    let server = make_server(common::create_test_state_with_policy(pool.clone(), policy));

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_link_rejects_whitespace_in_url(pool: PgPool) {
    let server = server_for(pool.clone());

    for url in [
        "https://example.com/a\nb",
        "https://exa\nmple.com",
        "https://example.com/a\tb",
        "https://example.com/a b",
    ] {
        let response = server
            .post("/api/links")
            .json(&json!({ "longUrl": url }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_reserved_route_codes(pool: PgPool) {
    let server = server_for(pool.clone());

    for code in ["healthz", "api"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com", "code": code }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"]["code"], "invalid_code");
        assert_eq!(body["error"]["message"], "This code is reserved");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_links_newest_first(pool: PgPool) {
    let server = server_for(pool);

    for (url, code) in [("https://a.com", "linka"), ("https://b.com", "linkb")] {
        server
            .post("/api/links")
            .json(&json!({ "longUrl": url, "code": code }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.get("/api/links").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let links = body["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["shortCode"], "linkb");
    assert_eq!(links[1]["shortCode"], "linka");
}

#[sqlx::test]
async fn test_list_links_empty(pool: PgPool) {
    let server = server_for(pool);

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "links": [] }));
}

#[sqlx::test]
async fn test_list_links_search_and_sort(pool: PgPool) {
    common::create_clicked_link(&pool, "docs1", "https://docs.rs/a", 1).await;
    common::create_clicked_link(&pool, "docs2", "https://docs.rs/b", 9).await;
    common::create_test_link(&pool, "blog1", "https://blog.example.com").await;
    let server = server_for(pool);

    let response = server
        .get("/api/links")
        .add_query_param("search", "docs")
        .add_query_param("sort", "clickCount")
        .add_query_param("order", "desc")
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    let codes: Vec<_> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["shortCode"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["docs2", "docs1"]);
}

#[sqlx::test]
async fn test_list_links_invalid_sort(pool: PgPool) {
    let server = server_for(pool);

    let response = server
        .get("/api/links")
        .add_query_param("sort", "popularity")
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_get_link(pool: PgPool) {
    common::create_clicked_link(&pool, "get001", "https://example.com", 3).await;
    let server = server_for(pool);

    let response = server.get("/api/links/get001").await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["shortCode"], "get001");
    assert_eq!(body["longUrl"], "https://example.com");
    assert_eq!(body["clickCount"], 3);
    assert!(body["lastClickedAt"].is_string());
}

#[sqlx::test]
async fn test_get_link_not_found(pool: PgPool) {
    let server = server_for(pool);

    let response = server.get("/api/links/nope01").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_link(pool: PgPool) {
    common::create_test_link(&pool, "del001", "https://example.com").await;
    let server = server_for(pool.clone());

    let response = server.delete("/api/links/del001").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Link deleted successfully" }));

    assert_eq!(common::count_links(&pool).await, 0);
    server.get("/api/links/del001").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_link_is_idempotent(pool: PgPool) {
    common::create_test_link(&pool, "del002", "https://example.com").await;
    let server = server_for(pool);

    server.delete("/api/links/del002").await.assert_status_ok();
    server.delete("/api/links/del002").await.assert_status_ok();
    server.delete("/api/links/never1").await.assert_status_ok();
}
