//! Handler for short URL creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::{ShortenRequest, UrlRecordDto};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a target URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` with the full record:
///
/// ```json
/// {
///   "id": 1,
///   "targetUrl": "https://example.com/some/long/path",
///   "shortCode": "aZ3x9Q",
///   "accessCount": 0,
///   "createdAt": "2026-01-01T00:00:00Z",
///   "updatedAt": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 for a malformed URL, 409 if uniqueness retries are
/// exhausted, 503 when the store is unreachable.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<UrlRecordDto>), AppError> {
    payload.validate()?;

    let record = state.records.create(payload.url).await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}
