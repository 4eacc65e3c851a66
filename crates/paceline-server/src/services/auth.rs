//! Registration and login.

use serde::Serialize;

use crate::auth::{Jwt, password};
use crate::error::{ApiError, ApiResult};
use crate::models::user::Credentials;
use crate::repo::UserRepo;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub email: String,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepo,
    jwt: Jwt,
}

impl AuthService {
    pub fn new(users: UserRepo, jwt: Jwt) -> Self {
        Self { users, jwt }
    }

    pub async fn register(&self, creds: &Credentials) -> ApiResult<AuthResponse> {
        let hashed = password::hash(creds.password.clone()).await?;
        let user = match self.users.insert(&creds.email, &hashed).await {
            Ok(user) => user,
            Err(err) if err.is_unique_violation() => {
                return Err(ApiError::conflict("Email is already taken"));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::info!(user_id = %user.id, "user registered");
        let token = self.jwt.issue(user.id, &user.email)?;
        Ok(AuthResponse {
            email: user.email,
            token,
        })
    }

    pub async fn login(&self, creds: &Credentials) -> ApiResult<AuthResponse> {
        let user = self
            .users
            .find_by_email(&creds.email)
            .await?
            .ok_or_else(|| ApiError::not_found("Email is not found"))?;
        let ok = password::verify(creds.password.clone(), user.password_hash.clone()).await?;
        if !ok {
            return Err(ApiError::unauthorized("Invalid email/password"));
        }
        let token = self.jwt.issue(user.id, &user.email)?;
        Ok(AuthResponse {
            email: user.email,
            token,
        })
    }
}
