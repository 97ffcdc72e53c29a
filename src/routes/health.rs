use crate::AppState;
use crate::db::models::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize, Debug)]
pub struct HealthStatus {
    pub database: bool,
    pub cache: bool,
}

fn database_reachable(state: &AppState) -> bool {
    match state.db.get() {
        Ok(mut conn) => diesel::sql_query("SELECT 1").execute(&mut conn).is_ok(),
        Err(e) => {
            tracing::error!("Health check could not get a connection: {}", e);
            false
        }
    }
}

/// 200 when PostgreSQL answers; Redis being down only flips `cache`.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = HealthStatus {
        database: database_reachable(&state),
        cache: state.user_cache.ping().await,
    };

    let response = if status.database {
        (
            StatusCode::OK,
            Json(ApiResponse::success(status, "Service healthy")),
        )
    } else {
        let mut body = ApiResponse::success(status, "Database unavailable");
        body.success = false;
        body.code = 503;
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    };
    response.into_response()
}
