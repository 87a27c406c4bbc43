/**
 * Password Hashing
 *
 * Thin wrappers over bcrypt that turn hashing failures into
 * `BackendError::Internal`. Hashes are never logged.
 *
 * bcrypt is CPU-bound, so both calls run on tokio's blocking pool and
 * leave the worker threads free for other requests.
 */

use crate::backend::error::{BackendError, BackendResult};

/// Hash a plaintext password with the given bcrypt cost
pub async fn hash_password(password: &str, cost: u32) -> BackendResult<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| {
            tracing::error!("Password hashing error: {:?}", e);
            BackendError::internal("Failed to hash password")
        })
}

/// Check a plaintext password against a stored hash
pub async fn verify_password(password: &str, password_hash: &str) -> BackendResult<bool> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| BackendError::internal(format!("Verification task failed: {e}")))?
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            BackendError::internal("Failed to verify password")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("password123", 4).await.unwrap();
        assert_ne!(hash, "password123");
        assert!(verify_password("password123", &hash).await.unwrap());
        assert!(!verify_password("password124", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_internal_error() {
        let result = verify_password("password123", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(BackendError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_hashing_yields_to_other_tasks() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        // Single-threaded runtime: the spawned task only runs if hashing yields.
        hash_password("password123", 10).await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }
}
