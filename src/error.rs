//! Error types for FolioQA
//!
//! This module defines all error types used throughout the service,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for FolioQA operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, provider interactions, and request handling.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (Gemini API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Transient provider failures (transport errors, 5xx responses)
    ///
    /// Distinguished from [`FolioError::Provider`] so callers can decide
    /// whether an immediate retry is worthwhile.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Invalid request input (empty question, missing fields, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested session does not exist in the store
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Missing credentials for the generation provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for FolioQA operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = FolioError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = FolioError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_provider_unavailable_error_display() {
        let error = FolioError::ProviderUnavailable("503 from upstream".to_string());
        assert_eq!(error.to_string(), "Provider unavailable: 503 from upstream");
    }

    #[test]
    fn test_invalid_request_error_display() {
        let error = FolioError::InvalidRequest("question is empty".to_string());
        assert_eq!(error.to_string(), "Invalid request: question is empty");
    }

    #[test]
    fn test_session_not_found_error_display() {
        let error = FolioError::SessionNotFound("abc-123".to_string());
        assert_eq!(error.to_string(), "Session not found: abc-123");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = FolioError::MissingCredentials("gemini".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credentials for provider: gemini"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: FolioError = io_error.into();
        assert!(matches!(error, FolioError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: FolioError = json_error.into();
        assert!(matches!(error, FolioError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: FolioError = yaml_error.into();
        assert!(matches!(error, FolioError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FolioError>();
    }
}
