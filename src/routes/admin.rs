use crate::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, put},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::*;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUserInfo, require_admin, require_auth};
use crate::services::admin_service::AdminService;
use crate::validation::ValidatedJson;

/// Every route here sits behind both the auth layer and the admin guard.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user).delete(delete_user))
        .route("/users/:id/status", put(update_user_status))
        .route("/dashboard", get(dashboard))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state, require_auth))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Query(params): Query<UserQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = AdminService::list_users(&mut conn, &auth_info.context(), &params)?
        .map(|user| user.with_asset_urls(&state.asset_helper));

    let response = ApiResponse::paginated(page, "Users retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let mut detail = AdminService::user_detail(&mut conn, &auth_info.context(), user_id)?;
    detail.user = detail.user.with_asset_urls(&state.asset_helper);
    detail.complaints = detail
        .complaints
        .into_iter()
        .map(|c| c.with_asset_urls(&state.asset_helper))
        .collect();

    let response = ApiResponse::success(detail, "User retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn update_user_status(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let user = {
        let mut conn = state.db.get()?;
        AdminService::update_user_status(&mut conn, &auth_info.context(), user_id, &payload)?
    };

    // 状态变更后缓存中的用户信息失效
    state.user_cache.invalidate(user_id).await;

    let message = format!("User {} successfully", user.status);
    let response = ApiResponse::success(user.with_asset_urls(&state.asset_helper), &message);
    Ok((StatusCode::OK, Json(response)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    {
        let mut conn = state.db.get()?;
        AdminService::delete_user(&mut conn, &auth_info.context(), user_id)?;
    }

    state.user_cache.invalidate(user_id).await;

    let response = ApiResponse::<()>::ok("User deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let stats = AdminService::dashboard(&mut conn, &auth_info.context())?;

    let response = ApiResponse::success(stats, "Dashboard statistics retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}
