//! URL record lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::error::{AppError, is_unique_violation_on_code};
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_target_url;
use serde_json::json;

/// Generation draws against the existence pre-check before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Insert attempts when the store's uniqueness constraint rejects a code
/// that passed the pre-check (two concurrent creates drew the same code).
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Service owning the URL record lifecycle: create, resolve, update,
/// delete, stats.
///
/// This is the sole writer of the record store. Short-code uniqueness is
/// guaranteed twice: the generator pre-checks existence, and the store's
/// unique constraint catches the window between pre-check and insert, in
/// which case the service redraws and retries instead of surfacing the
/// race to the caller.
pub struct UrlRecordService<R: RecordRepository> {
    repository: Arc<R>,
    code_length: usize,
}

impl<R: RecordRepository> UrlRecordService<R> {
    /// Creates a new service with the given repository and short-code length.
    pub fn new(repository: Arc<R>, code_length: usize) -> Self {
        Self {
            repository,
            code_length,
        }
    }

    /// Creates a new record for `target_url` with a freshly allocated code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `target_url` is not an absolute
    /// HTTP(S) URL, [`AppError::Conflict`] if uniqueness races exhaust the
    /// insert retries, [`AppError::Internal`] if code generation exhausts
    /// its attempt cap.
    pub async fn create(&self, target_url: String) -> Result<UrlRecord, AppError> {
        validate_target_url(&target_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let code = self.allocate_code().await?;

            match self
                .repository
                .insert(NewUrlRecord {
                    short_code: code,
                    target_url: target_url.clone(),
                })
                .await
            {
                Ok(record) => return Ok(record),
                Err(e) if is_unique_violation_on_code(&e) => {
                    // Lost the race between pre-check and insert; redraw.
                    tracing::debug!(attempt, "short code insert collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(
            "Could not allocate a unique short code",
            json!({ "attempts": MAX_INSERT_ATTEMPTS }),
        ))
    }

    /// Resolves a short code, atomically incrementing its access count.
    ///
    /// The returned record carries the incremented count; the caller is
    /// expected to redirect to `target_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    pub async fn resolve(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .increment_access(code)
            .await?
            .ok_or_else(|| record_not_found(code))
    }

    /// Replaces the target URL of an existing record.
    ///
    /// `short_code` and `access_count` are untouched; `updated_at` is
    /// refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL and
    /// [`AppError::NotFound`] for an unknown code.
    pub async fn update(&self, code: &str, new_target_url: String) -> Result<UrlRecord, AppError> {
        validate_target_url(&new_target_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        self.repository
            .update_target(code, &new_target_url)
            .await?
            .ok_or_else(|| record_not_found(code))
    }

    /// Deletes a record. Deletion is terminal; a second delete of the same
    /// code fails with [`AppError::NotFound`].
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if self.repository.delete(code).await? {
            Ok(())
        } else {
            Err(record_not_found(code))
        }
    }

    /// Fetches a record without touching its access count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    pub async fn stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| record_not_found(code))
    }

    /// Draws random codes until one is absent from the store.
    ///
    /// Capped at [`MAX_GENERATION_ATTEMPTS`] to bound latency when the
    /// store misbehaves; collision probability at realistic scale makes
    /// more than one draw astronomically unlikely.
    async fn allocate_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code(self.code_length);

            if !self.repository.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}

fn record_not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "shortCode": code }))
}
