//! Profile reads and partial updates.

use paceline_db::DbError;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::user::{UpdateUserPayload, UpdatedProfile, UserProfile};
use crate::repo::UserRepo;

#[derive(Clone)]
pub struct UserService {
    users: UserRepo,
}

impl UserService {
    pub fn new(users: UserRepo) -> Self {
        Self { users }
    }

    pub async fn profile(&self, id: Uuid) -> ApiResult<UserProfile> {
        let user = self.users.find_by_id(id).await.map_err(user_not_found)?;
        Ok(user.into())
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateUserPayload) -> ApiResult<UpdatedProfile> {
        let user = self
            .users
            .update_partial(id, payload)
            .await
            .map_err(user_not_found)?;
        Ok(user.into())
    }
}

fn user_not_found(err: DbError) -> ApiError {
    if err.is_not_found() {
        ApiError::not_found("User is not found")
    } else {
        err.into()
    }
}
