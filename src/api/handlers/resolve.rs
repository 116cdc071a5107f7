//! Handler for short code resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::UrlRecordDto;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its record, incrementing the access count.
///
/// # Endpoint
///
/// `GET /shorten/{code}`
///
/// The increment and the fetch are one atomic store operation; the response
/// carries the already-bumped count. The presentation layer redirects the
/// browser to `targetUrl`.
///
/// # Errors
///
/// Returns 404 if the short code doesn't exist.
pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlRecordDto>, AppError> {
    let record = state.records.resolve(&code).await?;

    Ok(Json(record.into()))
}
