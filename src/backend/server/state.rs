/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The SQLite connection pool
 * - The token manager (immutable after startup, `Arc` inside)
 * - The bcrypt cost used when hashing new passwords
 *
 * Nothing in here is mutable; all shared state lives in the database.
 *
 * # Example
 *
 * ```rust
 * use blog_api::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(app_state): State<AppState>) {
 *     let _pool = &app_state.db_pool;
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenManager;
use crate::shared::AuthConfig;

/// Central state container handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Issues and verifies access/refresh tokens
    pub tokens: TokenManager,

    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, auth: &AuthConfig) -> Self {
        Self {
            db_pool,
            tokens: TokenManager::new(auth),
            bcrypt_cost: auth.bcrypt_cost,
        }
    }
}

/// Lets handlers take `State<SqlitePool>` directly
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
