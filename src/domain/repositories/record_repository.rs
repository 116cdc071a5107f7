//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Record store interface for URL mappings.
///
/// The URL record service is the sole writer of the store; every mutation
/// goes through this trait. Operations that touch an existing record are
/// atomic at the store (single find-and-update statements), so concurrent
/// callers never observe partial state or lose counter increments.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecordRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Inserts a new record with `access_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists
    /// (unique constraint), [`AppError::Unavailable`] if the store is
    /// unreachable, [`AppError::Internal`] on other store errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short code without mutating it.
    ///
    /// Returns `Ok(None)` if no record matches.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Checks whether a short code is already taken.
    ///
    /// Used by the code generator's pre-check; cheaper than fetching the
    /// full record.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments `access_count` and refreshes `updated_at`,
    /// returning the updated record.
    ///
    /// The increment and fetch are a single store operation; concurrent
    /// resolves of the same code each observe a distinct prior value.
    ///
    /// Returns `Ok(None)` if no record matches.
    async fn increment_access(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically replaces `target_url` and refreshes `updated_at`.
    ///
    /// `short_code` and `access_count` are untouched.
    /// Returns `Ok(None)` if no record matches.
    async fn update_target(
        &self,
        code: &str,
        target_url: &str,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Removes a record.
    ///
    /// Returns `Ok(true)` if a record was deleted, `Ok(false)` if no record
    /// matched. Deletion is terminal; the code may be generated again later.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
