/**
 * Session Management and JWT Tokens
 *
 * This module issues, verifies, rotates and revokes the access/refresh token
 * pair of an identity.
 *
 * # Token Lifecycle
 *
 * - Access tokens are stateless. Signature and expiry decide validity.
 * - Refresh tokens are signed with a different secret and are also
 *   persisted on the user row. A refresh token is only accepted while it is
 *   byte-for-byte the value stored for its user, so logging out (clearing the
 *   column) or logging in again (overwriting it) retires the old token before
 *   it expires.
 * - Only one refresh token per user exists at a time: a login on a second
 *   device invalidates the first device's refresh token.
 */

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::{clear_refresh_token_if_matches, get_refresh_token, set_refresh_token};
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::AuthConfig;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Unique token id, keeps two tokens issued in the same second distinct
    pub jti: String,
}

/// Access and refresh token returned on login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// What to do with a refresh token once it has been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOperation {
    /// Clear the persisted token (logout)
    Revoke,
    /// Keep the persisted token and sign a new access token
    Reissue,
}

/// Result of a successful refresh-token verification
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub user_id: Uuid,
    /// Set for `RefreshOperation::Reissue`
    pub access_token: Option<String>,
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SigningKeys {
    fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

/// Issues and verifies session tokens
///
/// Built once from `AuthConfig` and shared through `AppState`; cloning is
/// cheap.
#[derive(Clone)]
pub struct TokenManager {
    access: Arc<SigningKeys>,
    refresh: Arc<SigningKeys>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

impl TokenManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: Arc::new(SigningKeys::new(config.access_secret(), config.access_ttl)),
            refresh: Arc::new(SigningKeys::new(config.refresh_secret(), config.refresh_ttl)),
        }
    }

    fn sign(keys: &SigningKeys, user_id: Uuid) -> BackendResult<String> {
        let now = unix_now();
        let exp = now.checked_add(keys.ttl.as_secs()).ok_or_else(|| {
            tracing::error!("Token lifetime overflows the expiry timestamp");
            BackendError::internal("Failed to sign token")
        })?;
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            tracing::error!("Failed to sign token: {:?}", e);
            BackendError::internal("Failed to sign token")
        })
    }

    fn verify(keys: &SigningKeys, token: &str) -> BackendResult<Uuid> {
        let data = decode::<Claims>(token, &keys.decoding, &validation()).map_err(|e| {
            tracing::debug!("Token rejected: {:?}", e.kind());
            BackendError::InvalidToken
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| BackendError::InvalidToken)
    }

    /// Sign a fresh access token without touching the store
    pub fn sign_access_token(&self, user_id: Uuid) -> BackendResult<String> {
        Self::sign(&self.access, user_id)
    }

    /// Sign an access/refresh pair and persist the refresh token
    ///
    /// The stored refresh token is overwritten, which retires whatever token
    /// the user held before.
    ///
    /// # Errors
    ///
    /// * `PersistenceError` - the user row could not be updated (including
    ///   the row not existing)
    /// * `Internal` - signing failed
    pub async fn issue_token_pair(&self, pool: &SqlitePool, user_id: Uuid) -> BackendResult<TokenPair> {
        let access_token = Self::sign(&self.access, user_id)?;
        let refresh_token = Self::sign(&self.refresh, user_id)?;

        let updated = set_refresh_token(pool, user_id, Some(&refresh_token)).await?;
        if !updated {
            tracing::error!("Refresh token not persisted, user {} not found", user_id);
            return Err(BackendError::PersistenceError(sqlx::Error::RowNotFound));
        }

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify an access token and return the user id it carries
    pub fn verify_access_token(&self, token: &str) -> BackendResult<Uuid> {
        Self::verify(&self.access, token)
    }

    /// Verify a refresh token against its signature and the stored value,
    /// then revoke it or sign a new access token
    ///
    /// # Errors
    ///
    /// * `ValidationError` - no token was presented
    /// * `InvalidToken` - bad signature, expired, unknown user, or the stored
    ///   token differs (never issued, revoked, or superseded)
    /// * `PersistenceError` - the store failed
    pub async fn verify_and_rotate_refresh(
        &self,
        pool: &SqlitePool,
        token: Option<&str>,
        operation: RefreshOperation,
    ) -> BackendResult<RefreshOutcome> {
        self.rotate(pool, token, operation, None).await
    }

    /// Revoke a refresh token on behalf of `owner`
    ///
    /// A token that belongs to another user is rejected and left in place.
    pub async fn revoke_for(
        &self,
        pool: &SqlitePool,
        owner: Uuid,
        token: Option<&str>,
    ) -> BackendResult<RefreshOutcome> {
        self.rotate(pool, token, RefreshOperation::Revoke, Some(owner)).await
    }

    async fn rotate(
        &self,
        pool: &SqlitePool,
        token: Option<&str>,
        operation: RefreshOperation,
        owner: Option<Uuid>,
    ) -> BackendResult<RefreshOutcome> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BackendError::validation("refreshToken", "Refresh token required"))?;

        let user_id = Self::verify(&self.refresh, token)?;

        if owner.is_some_and(|owner| owner != user_id) {
            tracing::warn!("Refresh token presented by a different user than its owner {}", user_id);
            return Err(BackendError::InvalidToken);
        }

        match operation {
            RefreshOperation::Revoke => {
                if !clear_refresh_token_if_matches(pool, user_id, token).await? {
                    tracing::warn!("Refresh token for user {} is not the stored one", user_id);
                    return Err(BackendError::InvalidToken);
                }

                tracing::info!("Refresh token revoked for user {}", user_id);
                Ok(RefreshOutcome {
                    user_id,
                    access_token: None,
                })
            }
            RefreshOperation::Reissue => {
                let stored = get_refresh_token(pool, user_id).await?.flatten();
                if stored.as_deref() != Some(token) {
                    tracing::warn!("Refresh token for user {} is not the stored one", user_id);
                    return Err(BackendError::InvalidToken);
                }

                let access_token = Self::sign(&self.access, user_id)?;
                Ok(RefreshOutcome {
                    user_id,
                    access_token: Some(access_token),
                })
            }
        }
    }
}
