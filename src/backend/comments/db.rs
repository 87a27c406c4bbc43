//! Database operations for comments
//!
//! A comment row carries its `post_id`; the post's ordered comment list is
//! kept in `post_comments`. Every write that touches both tables runs in one
//! transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// A comment on a post
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    #[serde(rename = "author")]
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a comment and append it to the post's comment list
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, author_id, content, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, post_id, author_id, content, created_at, updated_at
        "#
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO post_comments (post_id, comment_id, position)
        SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
        FROM post_comments
        WHERE post_id = $1
        "#
    )
    .bind(post_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(comment)
}

/// Comments of a post in list order
pub async fn list_comments(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.post_id, c.author_id, c.content, c.created_at, c.updated_at
        FROM post_comments pc
        JOIN comments c ON c.id = pc.comment_id
        WHERE pc.post_id = $1
        ORDER BY pc.position ASC
        "#
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Get a comment of a given post
pub async fn get_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, content, created_at, updated_at
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Replace the content of a comment
pub async fn update_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $1, updated_at = $2
        WHERE id = $3 AND post_id = $4
        RETURNING id, post_id, author_id, content, created_at, updated_at
        "#
    )
    .bind(content)
    .bind(Utc::now())
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Remove a comment and its list entry
///
/// # Returns
/// `false` when the post has no such comment; nothing is changed then.
pub async fn delete_comment(pool: &SqlitePool, post_id: Uuid, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM post_comments WHERE post_id = $1 AND comment_id = $2")
        .bind(post_id)
        .bind(comment_id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM comments WHERE id = $1 AND post_id = $2")
        .bind(comment_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    Ok(true)
}

/// Remove every comment of a post and empty its list
///
/// # Returns
/// Number of comments removed
pub async fn delete_all_comments(pool: &SqlitePool, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let removed = remove_comments_of(&mut *tx, post_id).await?;
    tx.commit().await?;
    Ok(removed)
}

/// Delete the post's list entries and comment rows on an open connection
///
/// Shared by `delete_all_comments` and the cascading post delete; the caller
/// owns the transaction.
pub(crate) async fn remove_comments_of(conn: &mut SqliteConnection, post_id: Uuid) -> Result<u64, sqlx::Error> {
    sqlx::query("DELETE FROM post_comments WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    let removed = sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(removed.rows_affected())
}
