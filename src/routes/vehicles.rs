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
use crate::services::vehicles_service::VehiclesService;
use crate::validation::ValidatedJson;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/admin/all", get(list_all_vehicles))
        .route("/:id/status", put(update_vehicle_status))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(list_my_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .merge(admin)
        .route_layer(from_fn_with_state(state, require_auth))
}

pub async fn list_my_vehicles(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let vehicles = VehiclesService::list_mine(&mut conn, &auth_info.context())?;

    let response = ApiResponse::success(vehicles, "Vehicles retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn list_all_vehicles(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Query(params): Query<VehicleQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = VehiclesService::list_all(&mut conn, &auth_info.context(), &params)?;

    let response = ApiResponse::paginated(page, "Vehicles retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let vehicle = VehiclesService::get(&mut conn, &auth_info.context(), vehicle_id)?;

    let response = ApiResponse::success(vehicle, "Vehicle retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateVehicleRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let vehicle = VehiclesService::create(&mut conn, &auth_info.context(), &payload)?;

    let response = ApiResponse::created(
        vehicle,
        "Vehicle registered successfully. Awaiting admin approval",
    );
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(vehicle_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateVehicleRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let vehicle = VehiclesService::update(&mut conn, &auth_info.context(), vehicle_id, &payload)?;

    let response = ApiResponse::success(
        vehicle,
        "Vehicle updated successfully. Awaiting admin approval",
    );
    Ok((StatusCode::OK, Json(response)))
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    VehiclesService::delete(&mut conn, &auth_info.context(), vehicle_id)?;

    let response = ApiResponse::<()>::ok("Vehicle deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn update_vehicle_status(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(vehicle_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateVehicleStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let vehicle =
        VehiclesService::update_status(&mut conn, &auth_info.context(), vehicle_id, &payload)?;

    let message = format!("Vehicle {} successfully", vehicle.status);
    let response = ApiResponse::success(vehicle, &message);
    Ok((StatusCode::OK, Json(response)))
}
