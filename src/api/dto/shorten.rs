//! DTOs for URL creation and update endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The target URL to shorten (must be a valid HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Request to replace the target URL of an existing short code.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    /// The new target URL (must be a valid HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}
