//! Extractor that guards protected routes. Handlers that take an
//! [`AuthUser`] argument only run for requests carrying a valid
//! `Authorization: Bearer <token>` header.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use uuid::Uuid;

use super::jwt::Jwt;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let jwt = req
        .app_data::<web::Data<Jwt>>()
        .ok_or_else(|| ApiError::internal("Jwt app data is not registered"))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization header"))?;
    let claims = jwt
        .verify(token)
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;
    Ok(AuthUser {
        user_id: claims.user_id,
        email: claims.user_email,
    })
}
