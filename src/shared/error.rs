//! Shared Error Types
//!
//! Errors raised outside of the HTTP handlers while validating request
//! payloads. The backend folds them into `BackendError` so they end up as
//! 400 responses.
//!
//! # Usage
//!
//! ```rust
//! use blog_api::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email format");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
