//! Liveness probe handler.

use axum::Json;

use crate::api::dto::HealthResponse;

/// Returns `200 OK` while the process is serving requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// Exempt from rate limiting.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
