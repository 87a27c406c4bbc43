/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Issue an access/refresh token pair, persisting the refresh token
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401
 * - A login replaces any refresh token the user held before
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - database, hashing or signing failure
///
/// # Example Response
///
/// ```json
/// {
///   "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refreshToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> BackendResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&app_state.db_pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            BackendError::InvalidCredentials
        })?;

    if !verify_password(&request.password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::InvalidCredentials);
    }

    let pair = app_state.tokens.issue_token_pair(&app_state.db_pool, user.id).await?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.id);

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}
