/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the bearer access token
 * from the Authorization header and provides the user ID to handlers.
 *
 * Every failure (missing header, wrong scheme, bad or expired token, user
 * no longer exists) is a 401 with the same body.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> BackendResult<&str> {
    let header = header.ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        BackendError::InvalidToken
    })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::InvalidToken
        })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it against the access secret
/// 3. Checks the user still exists
/// 4. Attaches `AuthenticatedUser` to request extensions for handlers
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> BackendResult<Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = bearer_token(header)?;

    let user_id = app_state.tokens.verify_access_token(token)?;

    verify_user_exists(&app_state.db_pool, user_id).await?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Verify user exists in database
async fn verify_user_exists(pool: &SqlitePool, user_id: Uuid) -> BackendResult<()> {
    get_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user: {}", user_id);
        BackendError::InvalidToken
    })?;

    Ok(())
}

/// Axum extractor for authenticated user
///
/// Only usable on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::InvalidToken
            })?;

        Ok(AuthUser(user))
    }
}
