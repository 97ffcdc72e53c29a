use crate::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::*;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUserInfo, require_admin, require_auth};
use crate::services::family_service::FamilyService;
use crate::validation::ValidatedJson;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/user/:user_id", get(list_user_family_members))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(list_family_members).post(create_family_member))
        .route(
            "/:id",
            get(get_family_member)
                .put(update_family_member)
                .delete(delete_family_member),
        )
        .merge(admin)
        .route_layer(from_fn_with_state(state, require_auth))
}

pub async fn list_family_members(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let members = FamilyService::list(&mut conn, &auth_info.context())?;

    let meta = ResponseMeta {
        request_id: None,
        pagination: None,
        total_count: Some(members.len() as i64),
        execution_time_ms: None,
    };
    let response =
        ApiResponse::success_with_meta(members, "Family members retrieved successfully", meta);
    Ok((StatusCode::OK, Json(response)))
}

pub async fn list_user_family_members(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let members = FamilyService::list_for_user(&mut conn, &auth_info.context(), user_id)?;

    let response = ApiResponse::success(members, "Family members retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_family_member(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(member_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let member = FamilyService::get(&mut conn, &auth_info.context(), member_id)?;

    let response = ApiResponse::success(member, "Family member retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn create_family_member(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateFamilyMemberRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let member = FamilyService::create(&mut conn, &auth_info.context(), &payload)?;

    let response = ApiResponse::created(member, "Family member added successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_family_member(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(member_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFamilyMemberRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let member = FamilyService::update(&mut conn, &auth_info.context(), member_id, &payload)?;

    let response = ApiResponse::success(member, "Family member updated successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn delete_family_member(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(member_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    FamilyService::delete(&mut conn, &auth_info.context(), member_id)?;

    let response = ApiResponse::<()>::ok("Family member removed successfully");
    Ok((StatusCode::OK, Json(response)))
}
