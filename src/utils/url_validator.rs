//! Target URL validation.
//!
//! A target must be a syntactically valid absolute URL with an HTTP(S)
//! scheme and a host. The URL is stored as given; no normalization.

use url::Url;

/// Errors that can occur during target URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates that `input` is an absolute HTTP(S) URL with a host.
///
/// Rejects dangerous schemes like `javascript:`, `data:`, `file:`.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes, and
/// [`UrlValidationError::MissingHost`] when no host is present.
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        assert!(validate_target_url("http://example.com").is_ok());
    }

    #[test]
    fn test_valid_https_url() {
        assert!(validate_target_url("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_valid_url_with_port() {
        assert!(validate_target_url("http://localhost:3000/test").is_ok());
    }

    #[test]
    fn test_valid_ip_address() {
        assert!(validate_target_url("http://192.168.1.1:8080/api").is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        let result = validate_target_url("not-a-url");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        let result = validate_target_url("example.com/page");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_empty_string() {
        let result = validate_target_url("");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_ftp_scheme() {
        let result = validate_target_url("ftp://example.com/file.txt");
        assert!(matches!(
            result,
            Err(UrlValidationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_rejects_javascript_scheme() {
        let result = validate_target_url("javascript:alert('xss')");
        assert!(matches!(
            result,
            Err(UrlValidationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_rejects_data_scheme() {
        let result = validate_target_url("data:text/plain,Hello");
        assert!(matches!(
            result,
            Err(UrlValidationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_rejects_mailto_scheme() {
        let result = validate_target_url("mailto:test@example.com");
        assert!(matches!(
            result,
            Err(UrlValidationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_accepts_very_long_url() {
        let url = format!("https://example.com/{}", "a".repeat(2000));
        assert!(validate_target_url(&url).is_ok());
    }
}
