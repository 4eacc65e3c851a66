//! Bcrypt hashing, pushed onto the blocking pool so hashing never stalls
//! the async workers.

use bcrypt::DEFAULT_COST;
use tokio::task;

use crate::error::{ApiError, ApiResult};

pub async fn hash(password: String) -> ApiResult<String> {
    hash_with_cost(password, DEFAULT_COST).await
}

pub async fn verify(password: String, hashed: String) -> ApiResult<bool> {
    task::spawn_blocking(move || bcrypt::verify(password, &hashed))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)
}

async fn hash_with_cost(password: String, cost: u32) -> ApiResult<String> {
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the test fast; the code path is identical.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hashed = hash_with_cost("hunter2hunter2".to_string(), TEST_COST)
            .await
            .unwrap();
        assert_ne!(hashed, "hunter2hunter2");
        assert!(verify("hunter2hunter2".to_string(), hashed).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_does_not_verify() {
        let hashed = hash_with_cost("correct horse".to_string(), TEST_COST)
            .await
            .unwrap();
        assert!(!verify("battery staple".to_string(), hashed).await.unwrap());
    }
}
