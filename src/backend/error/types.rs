/**
 * Backend Error Types
 *
 * This module defines the closed set of errors a request can end in.
 * Handlers, the auth middleware, the token manager and the cascading delete
 * coordinator all return `BackendError`, so callers match on the variant
 * instead of inspecting message strings.
 *
 * # Status Code Mapping
 *
 * - `ValidationError` - 400 Bad Request
 * - `InvalidCredentials` / `InvalidToken` - 401 Unauthorized
 * - `Forbidden` - 403 Forbidden
 * - `NotFoundError` - 404 Not Found
 * - `ConflictError` - 409 Conflict
 * - `PersistenceError` / `Internal` - 500 Internal Server Error
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use blog_api::backend::error::BackendError;
///
/// let err = BackendError::validation("refreshToken", "Refresh token required");
/// let err = BackendError::not_found("post", "42");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or missing input
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any token that fails verification.
    ///
    /// Expired, tampered, revoked, superseded and mismatched tokens all land
    /// here with the same message.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated, but not allowed to touch the resource
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// A record looked up by id does not exist
    #[error("{resource} not found")]
    NotFoundError {
        /// Kind of record ("post", "comment", "user")
        resource: &'static str,
        /// Id that was looked up
        id: String,
    },

    /// A unique field is already taken
    #[error("Conflict: {message}")]
    ConflictError {
        /// Human-readable error message
        message: String,
    },

    /// The store failed or a transaction was aborted
    #[error("Persistence error: {0}")]
    PersistenceError(#[from] sqlx::Error),

    /// Hashing or signing failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFoundError {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::ConflictError {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFoundError { .. } => StatusCode::NOT_FOUND,
            Self::ConflictError { .. } => StatusCode::CONFLICT,
            Self::PersistenceError(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Store and signing failures are reported generically; their details
    /// only go to the log.
    pub fn message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::Forbidden { message } => message.clone(),
            Self::ConflictError { message } => message.clone(),
            Self::PersistenceError(_) | Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::ValidationError { field, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = BackendError::validation("refreshToken", "Refresh token required");
        match error {
            BackendError::ValidationError { field, message } => {
                assert_eq!(field, "refreshToken");
                assert_eq!(message, "Refresh token required");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::validation("f", "m").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("post", "1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("dup").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BackendError::from(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(BackendError::internal("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_persistence_message_is_generic() {
        let error = BackendError::from(sqlx::Error::Protocol("secret detail".to_string()));
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(BackendError::not_found("post", "abc").message(), "post not found");
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("email", "Invalid email format").into();
        match backend_error {
            BackendError::ValidationError { field, .. } => assert_eq!(field, "email"),
            _ => panic!("Expected ValidationError variant"),
        }
    }
}
