//! HTTP handlers for comments
//!
//! Comments are addressed through their post: `/comment/{postId}/comment`.
//! The author may edit a comment; the author or the post's sender may delete
//! it; only the post's sender may clear all comments.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::comments::db::{self, Comment};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::posts::db::{get_post, Post};
use crate::backend::posts::handlers::owned_post;
use crate::shared::validation::require_text;

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

async fn existing_post(pool: &SqlitePool, post_id: Uuid) -> BackendResult<Post> {
    get_post(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", post_id))
}

/// The post can vanish between the existence check and the insert; the
/// deferred foreign key then fails the commit.
fn missing_post_on_fk_violation(err: sqlx::Error, post_id: Uuid) -> BackendError {
    if err.as_database_error().is_some_and(|db| db.is_foreign_key_violation()) {
        tracing::warn!("Post {} was deleted while a comment was being added", post_id);
        BackendError::not_found("post", post_id)
    } else {
        BackendError::from(err)
    }
}

async fn existing_comment(pool: &SqlitePool, post_id: Uuid, comment_id: Uuid) -> BackendResult<Comment> {
    db::get_comment(pool, post_id, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("comment", comment_id))
}

/// GET /comment/{postId}/comment
pub async fn list_comments(
    State(pool): State<SqlitePool>,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<Vec<Comment>>> {
    let Path(post_id) = path?;
    existing_post(&pool, post_id).await?;

    let comments = db::list_comments(&pool, post_id).await?;
    Ok(Json(comments))
}

/// GET /comment/{postId}/comment/{commentId}
pub async fn get_comment(
    State(pool): State<SqlitePool>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> BackendResult<Json<Comment>> {
    let Path((post_id, comment_id)) = path?;
    let comment = existing_comment(&pool, post_id, comment_id).await?;
    Ok(Json(comment))
}

/// POST /comment/{postId}/comment
pub async fn create_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<Comment>)> {
    let Path(post_id) = path?;
    let Json(request) = payload?;
    require_text("content", &request.content)?;

    existing_post(&pool, post_id).await?;

    let comment = db::create_comment(&pool, post_id, user.user_id, &request.content)
        .await
        .map_err(|e| missing_post_on_fk_violation(e, post_id))?;
    tracing::info!("Comment {} added to post {} by {}", comment.id, post_id, user.user_id);

    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /comment/{postId}/comment/{commentId}
pub async fn update_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> BackendResult<Json<Comment>> {
    let Path((post_id, comment_id)) = path?;
    let Json(request) = payload?;
    require_text("content", &request.content)?;

    let comment = existing_comment(&pool, post_id, comment_id).await?;
    if comment.author_id != user.user_id {
        tracing::warn!("User {} tried to edit comment {}", user.user_id, comment_id);
        return Err(BackendError::forbidden("Only the author of this comment can edit it"));
    }

    let comment = db::update_comment(&pool, post_id, comment_id, &request.content)
        .await?
        .ok_or_else(|| BackendError::not_found("comment", comment_id))?;

    Ok(Json(comment))
}

/// DELETE /comment/{postId}/comment/{commentId}
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let Path((post_id, comment_id)) = path?;

    let post = existing_post(&pool, post_id).await?;
    let comment = existing_comment(&pool, post_id, comment_id).await?;

    if comment.author_id != user.user_id && post.sender_id != user.user_id {
        tracing::warn!("User {} tried to delete comment {}", user.user_id, comment_id);
        return Err(BackendError::forbidden(
            "Only the comment author or the post author can delete it",
        ));
    }

    if !db::delete_comment(&pool, post_id, comment_id).await? {
        return Err(BackendError::not_found("comment", comment_id));
    }

    Ok(Json(MessageResponse {
        message: "Comment deleted successfully".to_string(),
    }))
}

/// DELETE /comment/{postId}/comment
pub async fn delete_all_comments(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let Path(post_id) = path?;

    owned_post(&pool, post_id, user.user_id).await?;

    let removed = db::delete_all_comments(&pool, post_id).await?;
    tracing::info!("Removed {} comments from post {}", removed, post_id);

    Ok(Json(MessageResponse {
        message: "All comments deleted successfully".to_string(),
    }))
}
