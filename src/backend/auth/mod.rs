//! Authentication Module
//!
//! This module handles user registration, login and the session-token
//! lifecycle. It provides HTTP handlers for the `/auth` endpoints and
//! manages user records and JWT tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - Token manager (issue, verify, rotate, revoke)
//! ├── password.rs     - bcrypt helpers
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: profile + password → user created (no tokens)
//! 2. **Login**: email + password → access/refresh pair, refresh persisted
//! 3. **Refresh**: refresh token → new access token, refresh token unchanged
//! 4. **Logout**: access token + refresh token → refresh token cleared
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access and refresh tokens are signed with different secrets
//! - One refresh token per user; a new login retires the previous one
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// Token issuing and verification
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, logout, refresh_token, register};
pub use sessions::{RefreshOperation, RefreshOutcome, TokenManager, TokenPair};
