//! Error types for the common library.
//!
//! # Error Categories
//!
//! - `ConfigError`: Invalid configuration values
//! - `Error::Upstream`: Pollinations API failures (includes endpoint and status)
//! - `Error::Validation`: Input validation failures, raised before any request
//! - `Error::Io`: File system operations
//! - `Error::Json`: Malformed JSON from the upstream service

use thiserror::Error;

/// Unified error type for the MCPollinations crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (invalid env values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream errors with endpoint and HTTP status context.
    ///
    /// A `status_code` of 0 means the request never produced a response
    /// (connection refused, DNS failure). Failures while reading the body of
    /// a successful response keep that response's status.
    #[error("Upstream error for {endpoint} (HTTP {status_code}): {message}")]
    Upstream {
        /// The endpoint that was called
        endpoint: String,
        /// HTTP status code returned by the service
        status_code: u16,
        /// Error message from the service or describing the failure
        message: String,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// File system I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new upstream error with endpoint, status code, and message.
    ///
    /// # Example
    ///
    /// ```
    /// use mcpollinations_common::error::Error;
    ///
    /// let err = Error::upstream("https://image.pollinations.ai/models", 502, "Bad Gateway");
    /// assert!(err.to_string().contains("image.pollinations.ai"));
    /// assert!(err.to_string().contains("502"));
    /// ```
    pub fn upstream(
        endpoint: impl Into<String>,
        status_code: u16,
        message: impl Into<String>,
    ) -> Self {
        Error::Upstream {
            endpoint: endpoint.into(),
            status_code,
            message: message.into(),
        }
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use mcpollinations_common::error::Error;
    ///
    /// let err = Error::validation("Prompt is required and must be a string");
    /// assert!(err.to_string().contains("Prompt is required"));
    /// ```
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Whether this error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Whether this error came from the upstream service.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream { .. })
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
