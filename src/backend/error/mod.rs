//! Backend Error Module
//!
//! This module defines the error type returned by every handler, the auth
//! middleware and the core components.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`; a handler returning
//! `Result<_, BackendError>` gets the status code and JSON body for free.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;

/// Result alias used across the backend
pub type BackendResult<T> = Result<T, BackendError>;
