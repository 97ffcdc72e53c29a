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
use crate::services::complaints_service::ComplaintsService;
use crate::validation::ValidatedJson;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/:id/status", put(update_complaint_status))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(list_complaints).post(create_complaint))
        .route(
            "/:id",
            get(get_complaint)
                .put(update_complaint)
                .delete(delete_complaint),
        )
        .merge(admin)
        .route_layer(from_fn_with_state(state, require_auth))
}

pub async fn create_complaint(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateComplaintRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let complaint = ComplaintsService::create(&mut conn, &auth_info.context(), &payload)?;

    let response = ApiResponse::created(
        complaint.with_asset_urls(&state.asset_helper),
        "Complaint submitted successfully",
    );
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_complaints(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Query(params): Query<ComplaintQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = ComplaintsService::list(&mut conn, &auth_info.context(), &params)?
        .map(|c| c.with_asset_urls(&state.asset_helper));

    let response = ApiResponse::paginated(page, "Complaints retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_complaint(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(complaint_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let complaint = ComplaintsService::get(&mut conn, &auth_info.context(), complaint_id)?;

    let response = ApiResponse::success(
        complaint.with_asset_urls(&state.asset_helper),
        "Complaint retrieved successfully",
    );
    Ok((StatusCode::OK, Json(response)))
}

pub async fn update_complaint(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(complaint_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateComplaintRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let complaint =
        ComplaintsService::update(&mut conn, &auth_info.context(), complaint_id, &payload)?;

    let response = ApiResponse::success(
        complaint.with_asset_urls(&state.asset_helper),
        "Complaint updated successfully",
    );
    Ok((StatusCode::OK, Json(response)))
}

pub async fn delete_complaint(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(complaint_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    ComplaintsService::delete(&mut conn, &auth_info.context(), complaint_id)?;

    let response = ApiResponse::<()>::ok("Complaint deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn update_complaint_status(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(complaint_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateComplaintStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let complaint =
        ComplaintsService::update_status(&mut conn, &auth_info.context(), complaint_id, &payload)?;

    let response = ApiResponse::success(
        complaint.with_asset_urls(&state.asset_helper),
        "Complaint status updated successfully",
    );
    Ok((StatusCode::OK, Json(response)))
}
