//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for every non-`/auth` route
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, Router};
//! use blog_api::backend::middleware::auth_middleware;
//! use blog_api::backend::server::state::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.route_layer(from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
