//! Database operations for posts
//!
//! Plain reads and writes on the `posts` table. Removing a post lives in
//! `cascade`, since it must take the post's comments with it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// A blog post
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Author of the post
    #[serde(rename = "sender")]
    pub sender_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a new post
pub async fn create_post(
    pool: &SqlitePool,
    sender_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, title, content, sender_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, content, sender_id, created_at, updated_at
        "#
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(sender_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get post by ID
pub async fn get_post(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, sender_id, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// List posts, optionally only those by one sender
pub async fn list_posts(pool: &SqlitePool, sender_id: Option<Uuid>) -> Result<Vec<Post>, sqlx::Error> {
    match sender_id {
        Some(sender_id) => {
            sqlx::query_as::<_, Post>(
                r#"
                SELECT id, title, content, sender_id, created_at, updated_at
                FROM posts
                WHERE sender_id = $1
                ORDER BY created_at ASC, rowid ASC
                "#
            )
            .bind(sender_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Post>(
                r#"
                SELECT id, title, content, sender_id, created_at, updated_at
                FROM posts
                ORDER BY created_at ASC, rowid ASC
                "#
            )
            .fetch_all(pool)
            .await
        }
    }
}

/// Update title and/or content, leaving `None` fields untouched
pub async fn update_post(
    pool: &SqlitePool,
    post_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($1, title),
            content = COALESCE($2, content),
            updated_at = $3
        WHERE id = $4
        RETURNING id, title, content, sender_id, created_at, updated_at
        "#
    )
    .bind(title)
    .bind(content)
    .bind(Utc::now())
    .bind(post_id)
    .fetch_optional(pool)
    .await
}
