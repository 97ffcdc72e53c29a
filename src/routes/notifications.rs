use crate::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::*;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUserInfo, require_admin, require_auth};
use crate::services::notifications_service::NotificationsService;
use crate::validation::ValidatedJson;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/send", post(send_notification))
        .route("/broadcast", post(broadcast_notification))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", put(mark_all_read))
        .route("/:id", delete(delete_notification))
        .route("/:id/read", put(mark_read))
        .merge(admin)
        .route_layer(from_fn_with_state(state, require_auth))
}

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Query(params): Query<NotificationQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = NotificationsService::list(&mut conn, &auth_info.context(), &params)?;

    let response = ApiResponse::paginated(page, "Notifications retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let count = NotificationsService::unread_count(&mut conn, &auth_info.context())?;

    let response = ApiResponse::success(count, "Unread count retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(notification_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let notification =
        NotificationsService::mark_read(&mut conn, &auth_info.context(), notification_id)?;

    let response = ApiResponse::success(notification, "Notification marked as read");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let updated = NotificationsService::mark_all_read(&mut conn, &auth_info.context())?;

    let message = format!("{} notifications marked as read", updated);
    let response = ApiResponse::<()>::ok(&message);
    Ok((StatusCode::OK, Json(response)))
}

pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(notification_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    NotificationsService::delete(&mut conn, &auth_info.context(), notification_id)?;

    let response = ApiResponse::<()>::ok("Notification deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn send_notification(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<SendNotificationRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let notification = NotificationsService::send(&mut conn, &auth_info.context(), &payload)?;

    let response = ApiResponse::created(notification, "Notification sent successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn broadcast_notification(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<BroadcastNotificationRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let result = NotificationsService::broadcast(&mut conn, &auth_info.context(), &payload)?;

    let message = format!("Notification broadcast to {} residents", result.recipients);
    let response = ApiResponse::created(result, &message);
    Ok((StatusCode::CREATED, Json(response)))
}
