//! PostgreSQL implementation of the record repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;

const RECORD_COLUMNS: &str = "id, short_code, target_url, access_count, created_at, updated_at";

/// PostgreSQL record store.
///
/// Every mutating statement is a single atomic round trip
/// (`INSERT`/`UPDATE`/`DELETE … RETURNING`), so the invariants on
/// `access_count` and `updated_at` hold under concurrent requests without
/// explicit locking.
pub struct PgRecordRepository {
    pool: Arc<PgPool>,
}

impl PgRecordRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            "INSERT INTO url_records (short_code, target_url) \
             VALUES ($1, $2) \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(&new_record.short_code)
        .bind(&new_record.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM url_records WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_records WHERE short_code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn increment_access(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            "UPDATE url_records \
             SET access_count = access_count + 1, updated_at = now() \
             WHERE short_code = $1 \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn update_target(
        &self,
        code: &str,
        target_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            "UPDATE url_records \
             SET target_url = $2, updated_at = now() \
             WHERE short_code = $1 \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(code)
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url_records WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
