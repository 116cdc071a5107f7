#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use urlcut::application::services::UrlRecordService;
use urlcut::infrastructure::persistence::PgRecordRepository;
use urlcut::ratelimit::FixedWindowGate;
use urlcut::state::AppState;

pub const TEST_CODE_LENGTH: usize = 6;

pub fn create_test_state(pool: PgPool) -> AppState {
    let repository = Arc::new(PgRecordRepository::new(Arc::new(pool)));
    let records = Arc::new(UrlRecordService::new(repository, TEST_CODE_LENGTH));
    let rate_gate = Arc::new(FixedWindowGate::new());

    // behind_proxy lets tests pick their client identity via headers.
    AppState::new(records, rate_gate, true)
}

pub async fn create_test_record(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO url_records (short_code, target_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn access_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT access_count FROM url_records WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn record_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_records")
        .fetch_one(pool)
        .await
        .unwrap()
}
