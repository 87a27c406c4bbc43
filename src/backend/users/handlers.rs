//! HTTP handlers for user profiles
//!
//! Listing and reading profiles is open to any authenticated user; changing
//! or deleting a profile is limited to its owner. Username and email are
//! fixed after registration.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::users::{self, ProfileUpdate, User};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::auth::AuthUser;
use crate::shared::validation::{require_text, validate_age};

/// Public view of a user; never carries the password hash or refresh token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile update body
///
/// `username` and `email` are accepted only so their presence can be
/// rejected with a clear message.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub username: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<serde_json::Value>,
}

impl UpdateUserRequest {
    fn into_update(self) -> BackendResult<ProfileUpdate> {
        if self.username.is_some() || self.email.is_some() {
            let field = if self.username.is_some() { "username" } else { "email" };
            return Err(BackendError::validation(field, "Updating username or email is not allowed"));
        }

        if let Some(first_name) = &self.first_name {
            require_text("firstName", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            require_text("lastName", last_name)?;
        }
        if let Some(age) = self.age {
            validate_age(age)?;
        }

        Ok(ProfileUpdate {
            first_name: self.first_name.map(|s| s.trim().to_string()),
            last_name: self.last_name.map(|s| s.trim().to_string()),
            age: self.age,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: UserProfile,
}

fn require_self(caller: Uuid, target: Uuid) -> BackendResult<()> {
    if caller != target {
        tracing::warn!("User {} tried to modify user {}", caller, target);
        return Err(BackendError::forbidden("You can only modify your own account"));
    }
    Ok(())
}

/// GET /user
pub async fn list_users(State(pool): State<SqlitePool>) -> BackendResult<Json<Vec<UserProfile>>> {
    let users = users::list_users(&pool).await?;
    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

/// GET /user/{id}
pub async fn get_user(
    State(pool): State<SqlitePool>,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<UserProfile>> {
    let Path(user_id) = path?;

    let user = users::get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("user", user_id))?;

    Ok(Json(user.into()))
}

/// PUT /user/{id}
pub async fn update_user(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> BackendResult<Json<UpdateUserResponse>> {
    let Path(user_id) = path?;
    let Json(request) = payload?;

    let update = request.into_update()?;
    require_self(caller.user_id, user_id)?;

    let user = users::update_profile(&pool, user_id, update)
        .await?
        .ok_or_else(|| BackendError::not_found("user", user_id))?;

    tracing::info!("User {} updated their profile", user_id);

    Ok(Json(UpdateUserResponse {
        message: "User updated successfully".to_string(),
        user: user.into(),
    }))
}

/// DELETE /user/{id}
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let Path(user_id) = path?;
    require_self(caller.user_id, user_id)?;

    if !users::delete_user(&pool, user_id).await? {
        return Err(BackendError::not_found("user", user_id));
    }

    tracing::info!("User {} deleted", user_id);

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
