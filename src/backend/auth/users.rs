/**
 * User Model and Database Operations
 *
 * This module handles identity records, including the single persisted
 * refresh token used by the session-token lifecycle.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Currently valid refresh token, `None` when logged out
    pub refresh_token: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub password_hash: String,
}

/// Profile fields a user may change after registration
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
}

/// Create a new user
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NULL, $8, $9)
        RETURNING id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at
        "#
    )
    .bind(id)
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(new_user.age)
    .bind(&new_user.password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at
        FROM users
        WHERE email = $1
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by username
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at
        FROM users
        WHERE username = $1
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List all users, oldest first
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at
        FROM users
        ORDER BY created_at ASC, rowid ASC
        "#
    )
    .fetch_all(pool)
    .await
}

/// Overwrite the persisted refresh token
///
/// # Returns
/// `false` when no user with this id exists
pub async fn set_refresh_token(
    pool: &SqlitePool,
    user_id: Uuid,
    token: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET refresh_token = $1, updated_at = $2
        WHERE id = $3
        "#
    )
    .bind(token)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Load the persisted refresh token
///
/// Outer `None` means the user does not exist, inner `None` means the user
/// holds no refresh token.
pub async fn get_refresh_token(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<Option<String>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<String>>("SELECT refresh_token FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Clear the refresh token only if it still equals `token`
///
/// Compare and clear happen in one statement, so of two concurrent callers
/// presenting the same token only one gets `true`.
pub async fn clear_refresh_token_if_matches(
    pool: &SqlitePool,
    user_id: Uuid,
    token: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET refresh_token = NULL, updated_at = $1
        WHERE id = $2 AND refresh_token = $3
        "#
    )
    .bind(Utc::now())
    .bind(user_id)
    .bind(token)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Update profile fields, leaving `None` fields untouched
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            age = COALESCE($3, age),
            updated_at = $4
        WHERE id = $5
        RETURNING id, username, email, first_name, last_name, age, password_hash, refresh_token, created_at, updated_at
        "#
    )
    .bind(update.first_name)
    .bind(update.last_name)
    .bind(update.age)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Delete a user
///
/// # Returns
/// `false` when no user with this id exists
pub async fn delete_user(pool: &SqlitePool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}
