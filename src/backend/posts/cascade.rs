/**
 * Cascading Post Delete
 *
 * Removes a post together with every comment that belongs to it and the
 * post's comment list, as one transaction. Either all of it is gone after
 * the call or none of it is.
 *
 * # Order
 *
 * 1. Delete the post row (stop with `NotFoundError` when nothing matched)
 * 2. Delete the `post_comments` entries of the post
 * 3. Delete every comment with that `post_id`
 * 4. Commit
 *
 * Comment references to posts are checked at commit, which is what lets the
 * post go first.
 */

use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::comments::db::remove_comments_of;
use crate::backend::error::{BackendError, BackendResult};

/// What a successful cascade removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub comments_removed: u64,
}

/// Delete a post and all of its comments atomically
///
/// # Errors
///
/// * `NotFoundError` - no post with this id; the store is unchanged
/// * `PersistenceError` - any step failed; the transaction was rolled back
///   and the post and its comments are still present
pub async fn delete_post_cascade(pool: &SqlitePool, post_id: Uuid) -> BackendResult<CascadeReport> {
    let mut tx = pool.begin().await?;

    match remove_post_and_comments(&mut *tx, post_id).await {
        Ok(Some(report)) => {
            tx.commit().await?;
            tracing::info!(
                "Post {} deleted with {} comments",
                post_id,
                report.comments_removed
            );
            Ok(report)
        }
        Ok(None) => {
            tx.rollback().await?;
            tracing::debug!("Cascade delete of missing post {}", post_id);
            Err(BackendError::not_found("post", post_id))
        }
        Err(e) => {
            tracing::error!("Cascade delete of post {} failed, rolling back: {:?}", post_id, e);
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("Rollback of post {} cascade failed: {:?}", post_id, rollback_err);
            }
            Err(BackendError::from(e))
        }
    }
}

async fn remove_post_and_comments(
    conn: &mut SqliteConnection,
    post_id: Uuid,
) -> Result<Option<CascadeReport>, sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    if deleted.rows_affected() == 0 {
        return Ok(None);
    }

    let comments_removed = remove_comments_of(conn, post_id).await?;

    Ok(Some(CascadeReport { comments_removed }))
}
