use actix_web::{HttpResponse, web};

use crate::error::{ApiError, ApiResult};
use crate::models::user::Credentials;
use crate::state::AppState;

pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<Credentials>,
) -> ApiResult<HttpResponse> {
    payload.validate().map_err(ApiError::bad_request)?;
    let response = state.auth.register(&payload).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<Credentials>,
) -> ApiResult<HttpResponse> {
    payload.validate().map_err(ApiError::bad_request)?;
    let response = state.auth.login(&payload).await?;
    Ok(HttpResponse::Ok().json(response))
}
