use actix_web::{HttpResponse, web};
use paceline_db::Page;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::activity::{
    ActivityFilter, ActivityListQuery, NewActivityPayload, UpdateActivityPayload,
};
use crate::state::AppState;

pub async fn list(
    state: web::Data<AppState>,
    _user: AuthUser,
    query: web::Query<ActivityListQuery>,
) -> ApiResult<HttpResponse> {
    let filter = ActivityFilter::from_query(&query);
    let page = Page::from_raw(query.limit.as_deref(), query.offset.as_deref());
    let activities = state.activities.list(&filter, page).await?;
    Ok(HttpResponse::Ok().json(activities))
}

pub async fn create(
    state: web::Data<AppState>,
    _user: AuthUser,
    payload: web::Json<NewActivityPayload>,
) -> ApiResult<HttpResponse> {
    payload.validate().map_err(ApiError::bad_request)?;
    let activity = state.activities.create(&payload).await?;
    Ok(HttpResponse::Created().json(activity))
}

pub async fn update(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<String>,
    payload: web::Json<UpdateActivityPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_activity_id(&path)?;
    payload.validate().map_err(ApiError::bad_request)?;
    let activity = state.activities.update(id, &payload).await?;
    Ok(HttpResponse::Ok().json(activity))
}

pub async fn delete(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_activity_id(&path)?;
    state.activities.delete(id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Path ids that are not UUIDs behave like rows that do not exist.
fn parse_activity_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Activity is not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_maps_to_not_found() {
        let err = parse_activity_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn well_formed_id_parses() {
        assert!(parse_activity_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    }
}
