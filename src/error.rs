//! Storefront error types.

use thiserror::Error;

/// Storefront errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field was missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Free-text input was flagged by the XSS detector.
    #[error("Suspicious input in field '{field}'")]
    SuspiciousInput {
        /// Name of the field that was flagged.
        field: String,
    },

    /// Username already registered.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Login failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, or expired.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Password hashing or verification failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Requested record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uploaded image has an unsupported extension.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Filename rejected by the upload store.
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<jsonwebtoken::errors::Error> for StoreError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        StoreError::InvalidToken(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}
