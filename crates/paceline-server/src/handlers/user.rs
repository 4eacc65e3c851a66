use actix_web::{HttpResponse, web};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::user::UpdateUserPayload;
use crate::state::AppState;

pub async fn profile(state: web::Data<AppState>, user: AuthUser) -> ApiResult<HttpResponse> {
    let profile = state.users.profile(user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update(
    state: web::Data<AppState>,
    user: AuthUser,
    payload: web::Json<UpdateUserPayload>,
) -> ApiResult<HttpResponse> {
    payload.validate().map_err(ApiError::bad_request)?;
    let updated = state.users.update(user.user_id, &payload).await?;
    Ok(HttpResponse::Ok().json(updated))
}
