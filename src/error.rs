//! Application error taxonomy and HTTP mapping.
//!
//! All fallible operations in the service return [`AppError`]. The HTTP layer
//! converts a kind into a status code and a stable JSON body; store-driver
//! detail is logged and never surfaced to callers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Wire representation of an error: stable code, human message, detail payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Error kinds surfaced by the URL record service and rate policy gate.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input; the caller must change the request.
    Validation { message: String, details: Value },
    /// No record exists for the given short code.
    NotFound { message: String, details: Value },
    /// Short-code uniqueness race that exhausted generator retries.
    Conflict { message: String, details: Value },
    /// Per-client quota exceeded; retryable after the window resets.
    RateLimited { message: String, details: Value },
    /// Store unreachable or timed out; retryable.
    Unavailable { message: String, details: Value },
    /// Unexpected fault, non-operational.
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::Unavailable { .. } => "service_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::RateLimited { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };
        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({})),
        )
    }
}

/// Classifies store failures into the application taxonomy.
///
/// Unique violations become [`AppError::Conflict`] so the service can retry
/// code generation. Connectivity and timeout failures become
/// [`AppError::Unavailable`]. Everything else is logged and collapsed into
/// [`AppError::Internal`] with an empty detail payload.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                tracing::warn!(error = %e, "store unavailable");
                AppError::unavailable("Storage backend is unavailable", json!({}))
            }
            other => {
                tracing::error!(error = %other, "unclassified store error");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

/// Returns true when the error is a unique violation on the short-code key.
pub fn is_unique_violation_on_code(e: &AppError) -> bool {
    matches!(
        e,
        AppError::Conflict { details, .. }
            if details.get("constraint").and_then(Value::as_str)
                == Some("url_records_short_code_key")
    )
}
