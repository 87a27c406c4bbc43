/**
 * Refresh Token Handler
 *
 * POST /auth/refresh-token. Exchanges a live refresh token for a new access
 * token. The refresh token itself stays valid until logout or the next login.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{AccessTokenResponse, RefreshTokenRequest};
use crate::backend::auth::sessions::RefreshOperation;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Refresh token handler
///
/// # Errors
///
/// * `400 Bad Request` - no refresh token in the body
/// * `401 Unauthorized` - refresh token invalid, expired, revoked or superseded
pub async fn refresh_token(
    State(app_state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> BackendResult<Json<AccessTokenResponse>> {
    let Json(request) = payload?;

    let outcome = app_state
        .tokens
        .verify_and_rotate_refresh(
            &app_state.db_pool,
            request.refresh_token.as_deref(),
            RefreshOperation::Reissue,
        )
        .await?;

    let access_token = outcome
        .access_token
        .ok_or_else(|| BackendError::internal("Reissue produced no access token"))?;

    tracing::debug!("Access token reissued for user {}", outcome.user_id);

    Ok(Json(AccessTokenResponse { access_token }))
}
