//! Shared Module
//!
//! Types that are used by both the request layer and the persistence layer
//! of the blog API: configuration, input validation and the shared error
//! type those produce.
//!
//! Nothing in here touches the database or the HTTP stack, which keeps these
//! pieces cheap to unit-test.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Request field validation
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AuthConfig, AuthConfigBuilder, ConfigError, parse_duration};
