use crate::AppState;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::db::models::*;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUserInfo, require_auth};
use crate::routes::run_blocking;
use crate::services::auth_service::AuthService;
use crate::validation::ValidatedJson;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(me))
        .route("/profile", put(update_profile))
        .route("/change-password", put(change_password))
        .route_layer(from_fn_with_state(state, require_auth))
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let auth_config = state.config.auth();
    let user = run_blocking(&state, move |conn| {
        AuthService::register(conn, &auth_config, &payload)
    })
    .await?;

    let data = UserResponse::from(user).with_asset_urls(&state.asset_helper);
    let response = ApiResponse::created(
        data,
        "Registration successful. Your account is awaiting admin approval",
    );
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let tokens = state.token_service.clone();
    let mut login = run_blocking(&state, move |conn| {
        AuthService::login(conn, &tokens, &payload)
    })
    .await?;

    login.user = login.user.with_asset_urls(&state.asset_helper);
    let response = ApiResponse::success(login, "Login successful");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let user = AuthService::me(&mut conn, &auth_info.context())?;

    let response = ApiResponse::success(
        user.with_asset_urls(&state.asset_helper),
        "User retrieved successfully",
    );
    Ok((StatusCode::OK, Json(response)))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let user = {
        let mut conn = state.db.get()?;
        AuthService::update_profile(&mut conn, &auth_info.context(), &payload)?
    };

    state.user_cache.invalidate(auth_info.user.id).await;

    let response = ApiResponse::success(
        user.with_asset_urls(&state.asset_helper),
        "Profile updated successfully",
    );
    Ok((StatusCode::OK, Json(response)))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let auth_config = state.config.auth();
    let ctx = auth_info.context();
    run_blocking(&state, move |conn| {
        AuthService::change_password(conn, &auth_config, &ctx, &payload)
    })
    .await?;

    let response = ApiResponse::<()>::ok("Password changed successfully");
    Ok((StatusCode::OK, Json(response)))
}
