use crate::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post, put},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::*;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUserInfo, require_admin, require_auth};
use crate::services::notices_service::NoticesService;
use crate::validation::ValidatedJson;

/// Reads are open to every approved user. Writes share the same paths but
/// sit behind the admin guard, merged in per method.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/", post(create_notice))
        .route("/:id", put(update_notice).delete(delete_notice))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(list_notices))
        .route("/:id", get(get_notice))
        .merge(admin)
        .route_layer(from_fn_with_state(state, require_auth))
}

pub async fn list_notices(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Query(params): Query<NoticeQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = NoticesService::list(&mut conn, &auth_info.context(), &params)?;

    let response = ApiResponse::paginated(page, "Notices retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_notice(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(notice_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let notice = NoticesService::get(&mut conn, &auth_info.context(), notice_id)?;

    let response = ApiResponse::success(notice, "Notice retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn create_notice(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateNoticeRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let notice = NoticesService::create(&mut conn, &auth_info.context(), &payload)?;

    let response = ApiResponse::created(notice, "Notice created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_notice(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(notice_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNoticeRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let notice = NoticesService::update(&mut conn, &auth_info.context(), notice_id, &payload)?;

    let response = ApiResponse::success(notice, "Notice updated successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn delete_notice(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(notice_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    NoticesService::delete(&mut conn, &auth_info.context(), notice_id)?;

    let response = ApiResponse::<()>::ok("Notice deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}
