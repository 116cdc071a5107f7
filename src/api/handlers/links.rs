//! Handlers for updating and deleting short URLs.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::{UpdateUrlRequest, UrlRecordDto};
use crate::error::AppError;
use crate::state::AppState;

/// Replaces the target URL of an existing short code.
///
/// # Endpoint
///
/// `PUT /shorten/{code}`
///
/// The short code and access count are untouched; `updatedAt` is refreshed.
///
/// # Errors
///
/// Returns 400 for a malformed URL, 404 for an unknown code.
pub async fn update_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlRecordDto>, AppError> {
    payload.validate()?;

    let record = state.records.update(&code, payload.url).await?;

    Ok(Json(record.into()))
}

/// Deletes a short URL.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// Returns `204 No Content` on success. A second delete of the same code
/// returns 404; deletion is terminal.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.records.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
