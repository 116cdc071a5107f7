mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use urlcut::api::handlers::{resolve_handler, stats_handler};

fn stats_app(state: urlcut::AppState) -> TestServer {
    let app = Router::new()
        .route("/shorten/{code}", get(resolve_handler))
        .route("/shorten/{code}/stats", get(stats_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_stats_returns_record_without_increment(pool: PgPool) {
    common::create_test_record(&pool, "abc123", "https://example.com").await;
    let server = stats_app(common::create_test_state(pool.clone()));

    // Three resolves, then stats.
    for _ in 0..3 {
        server.get("/shorten/abc123").await.assert_status_ok();
    }

    let response = server.get("/shorten/abc123/stats").await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["shortCode"], "abc123");
    assert_eq!(body["targetUrl"], "https://example.com");
    assert_eq!(body["accessCount"], 3);

    // Reading stats did not bump the counter.
    assert_eq!(common::access_count(&pool, "abc123").await, 3);
}

#[sqlx::test]
async fn test_stats_unknown_code(pool: PgPool) {
    let server = stats_app(common::create_test_state(pool));

    let response = server.get("/shorten/missing/stats").await;
    response.assert_status_not_found();
}
