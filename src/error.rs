//! Error types for the SEO scorer.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for extraction and orchestration
//! - `Result<T>`: Type alias for Results using AppError
//!
//! The scoring engine itself is total and never produces these errors.

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The extraction collaborator answered, but not with usable data
    #[error("Extraction error ({service}): {message}")]
    ExtractionError { service: &'static str, message: String },

    /// Settings file or value is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create an extraction service error
    pub fn extraction(service: &'static str, msg: impl Into<String>) -> Self {
        Self::ExtractionError {
            service,
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::NetworkError(format!("request timed out: {}", error))
        } else {
            Self::NetworkError(error.to_string())
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
