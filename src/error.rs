//! Error types for TrackerDesk
//!
//! This module defines all error types used throughout the application.
//! Backend failures keep the raw response body so the UI can show the
//! server's own message.

use std::io;
use thiserror::Error;

/// Main error type for TrackerDesk application
#[derive(Error, Debug)]
pub enum TrackerDeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend REST API errors
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The async runtime could not be started
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The native window failed to open or crashed
    #[error("Window error: {0}")]
    Window(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Configuration directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to create configuration directory: {0}")]
    DirectoryCreationFailed(String),
}

/// Errors raised while talking to the tracking server
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-success status; the body text is the message
    #[error("{body}")]
    Status { status: u16, body: String },

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Http(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Base URL or endpoint could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Type alias for Results using TrackerDeskError
pub type Result<T> = std::result::Result<T, TrackerDeskError>;

/// Type alias for Config Results
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Type alias for API Results
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_body() {
        let error = ApiError::Status {
            status: 400,
            body: "Device not found".to_string(),
        };
        assert_eq!(error.to_string(), "Device not found");
    }

    #[test]
    fn test_api_error_passes_through_top_level() {
        let error: TrackerDeskError = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let desk_error: TrackerDeskError = io_error.into();
        assert!(matches!(desk_error, TrackerDeskError::Io(_)));

        let desk_error: TrackerDeskError = ConfigError::DirectoryNotFound("home".to_string()).into();
        assert_eq!(
            desk_error.to_string(),
            "Configuration error: Configuration directory not found: home"
        );

        let window = TrackerDeskError::Window("no display".to_string());
        assert_eq!(window.to_string(), "Window error: no display");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::InvalidValue("timeout must be positive".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration value: timeout must be positive"
        );
    }
}
