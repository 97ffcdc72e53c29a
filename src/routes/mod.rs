pub mod admin;
pub mod auth;
pub mod complaints;
pub mod family;
pub mod health;
pub mod notices;
pub mod notifications;
pub mod vehicles;

use crate::db::models::ApiResponse;
use crate::error::{AppError, AppResult};
use crate::AppState;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use diesel::PgConnection;
use std::sync::Arc;
use tokio::task;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/admin", admin::router(state.clone()))
        .nest("/api/notices", notices::router(state.clone()))
        .nest("/api/complaints", complaints::router(state.clone()))
        .nest("/api/family", family::router(state.clone()))
        .nest("/api/vehicles", vehicles::router(state.clone()))
        .nest("/api/notifications", notifications::router(state.clone()))
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::not_found("Route not found")),
    )
}

/// Runs a connection-bound closure on the blocking pool; used where the
/// work includes bcrypt hashing.
pub(crate) async fn run_blocking<T, F>(state: &Arc<AppState>, f: F) -> AppResult<T>
where
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = state.db.clone();
    task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut *conn)
    })
    .await
    .map_err(|e| AppError::internal(format!("Blocking task failed: {}", e)))?
}
