//! Backend Module
//!
//! This module contains all server-side code for the blog API: an Axum HTTP
//! server over a SQLite store.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, token manager, user records
//! - **`users`** - Profile endpoints
//! - **`posts`** - Posts and the cascading delete
//! - **`comments`** - Comments and their per-post ordering
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and sessions
//! ├── users/          - User profile handlers
//! ├── posts/          - Posts and cascading delete
//! ├── comments/       - Comments
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Authorization
//!
//! Everything except register, login and refresh-token needs
//! `Authorization: Bearer <accessToken>`. Failing that is a 401; being
//! authenticated but not owning the resource is a 403.

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// User profile endpoints
pub mod users;

/// Posts and the cascading delete
pub mod posts;

/// Comments
pub mod comments;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;
