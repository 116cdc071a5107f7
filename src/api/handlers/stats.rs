//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::UrlRecordDto;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the record for a short code without touching its access count.
///
/// # Endpoint
///
/// `GET /shorten/{code}/stats`
///
/// # Errors
///
/// Returns 404 if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlRecordDto>, AppError> {
    let record = state.records.stats(&code).await?;

    Ok(Json(record.into()))
}
