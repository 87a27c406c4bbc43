//! Blog API - Main Library
//!
//! A REST API for a small blogging application: users register and log in,
//! publish posts, and comment on each other's posts.
//!
//! # Overview
//!
//! This library provides:
//! - Access/refresh token sessions with server-side refresh-token revocation
//! - Bearer-token authentication in front of every resource route
//! - Post and comment CRUD with ownership checks
//! - Transactional post deletion that removes the post's comments with it
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, input validation and the shared error type
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, routes and auth middleware
//!   - Token manager, password hashing, user records
//!   - Posts, comments and the cascading delete
//!   - SQLite persistence through sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use blog_api::backend::server::{build_app, config::ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = build_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` and `shared::ConfigError` for validation and
//!   configuration
//! - `backend::error::BackendError` for everything a request can end in;
//!   it converts into a JSON response with the matching status code

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
