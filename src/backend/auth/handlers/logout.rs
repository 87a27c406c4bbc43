/**
 * Logout Handler
 *
 * POST /auth/logout. Requires a bearer access token; the body carries the
 * refresh token to revoke. The refresh token must belong to the caller.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{MessageResponse, RefreshTokenRequest};
use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Logout handler
///
/// # Errors
///
/// * `400 Bad Request` - no refresh token in the body
/// * `401 Unauthorized` - refresh token invalid, already revoked, superseded,
///   or owned by someone else
pub async fn logout(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let Json(request) = payload?;

    app_state
        .tokens
        .revoke_for(&app_state.db_pool, user.user_id, request.refresh_token.as_deref())
        .await?;

    tracing::info!("User logged out: {}", user.user_id);

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}
