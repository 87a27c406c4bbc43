//! HTTP handlers for posts
//!
//! All routes sit behind the auth middleware. Only the sender of a post may
//! change or delete it.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::UserSummary;
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::comments::db::{list_comments, Comment};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::posts::cascade::delete_post_cascade;
use crate::backend::posts::db::{self, Post};
use crate::shared::validation::require_text;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub sender: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A post with its sender and its comments in list order
///
/// `sender` is `null` once the sender's account has been deleted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub sender: Option<UserSummary>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDetail {
    fn new(post: Post, sender: Option<&User>, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            sender: sender.map(UserSummary::from),
            comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostResponse {
    pub message: String,
    pub comments_removed: u64,
}

/// Load a post and check the caller sent it
pub(crate) async fn owned_post(pool: &SqlitePool, post_id: Uuid, caller: Uuid) -> BackendResult<Post> {
    let post = db::get_post(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", post_id))?;

    if post.sender_id != caller {
        tracing::warn!("User {} tried to modify post {} owned by {}", caller, post_id, post.sender_id);
        return Err(BackendError::forbidden("Only the author of this post can do that"));
    }

    Ok(post)
}

/// GET /post[?sender=<uuid>]
pub async fn list_posts(
    State(pool): State<SqlitePool>,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> BackendResult<Json<Vec<Post>>> {
    let Query(query) = query?;
    let posts = db::list_posts(&pool, query.sender).await?;
    Ok(Json(posts))
}

/// GET /post/{id}
pub async fn get_post(
    State(pool): State<SqlitePool>,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<PostDetail>> {
    let Path(post_id) = path?;

    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", post_id))?;
    let sender = get_user_by_id(&pool, post.sender_id).await?;
    let comments = list_comments(&pool, post_id).await?;

    Ok(Json(PostDetail::new(post, sender.as_ref(), comments)))
}

/// POST /post
pub async fn create_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<Post>)> {
    let Json(request) = payload?;
    require_text("title", &request.title)?;
    require_text("content", &request.content)?;

    let post = db::create_post(&pool, user.user_id, request.title.trim(), &request.content).await?;
    tracing::info!("Post {} created by {}", post.id, user.user_id);

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /post/{id}
pub async fn update_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> BackendResult<Json<Post>> {
    let Path(post_id) = path?;
    let Json(request) = payload?;

    if let Some(title) = &request.title {
        require_text("title", title)?;
    }
    if let Some(content) = &request.content {
        require_text("content", content)?;
    }

    owned_post(&pool, post_id, user.user_id).await?;

    let post = db::update_post(
        &pool,
        post_id,
        request.title.as_deref().map(str::trim),
        request.content.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("post", post_id))?;

    Ok(Json(post))
}

/// DELETE /post/{id}
///
/// Takes the post's comments with it.
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<DeletePostResponse>> {
    let Path(post_id) = path?;

    owned_post(&pool, post_id, user.user_id).await?;

    let report = delete_post_cascade(&pool, post_id).await?;

    Ok(Json(DeletePostResponse {
        message: "Post deleted successfully".to_string(),
        comments_removed: report.comments_removed,
    }))
}
