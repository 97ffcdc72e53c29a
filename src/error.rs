use crate::db::models::api::{ApiResponse, ErrorDetail};
use axum::{Json, http::StatusCode, response::IntoResponse};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DieselError),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Authentication error: {message}")]
    Auth { message: String, code: &'static str },

    #[error("Forbidden: {message}")]
    Forbidden { message: String, code: &'static str },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid input: {} field error(s)", .0.len())]
    InvalidInput(Vec<ErrorDetail>),

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Duplicate: {message}")]
    Duplicate {
        message: String,
        field: Option<String>,
        code: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DieselError> for AppError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => AppError::not_found("Record"),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                AppError::Duplicate {
                    message: "Record already exists".to_string(),
                    field: info.column_name().map(str::to_string),
                    code: "DUPLICATE".to_string(),
                }
            }
            other => AppError::Database(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidInput(_) | AppError::Duplicate { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Auth { .. } | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Redis(_)
            | AppError::Config(_)
            | AppError::Bcrypt(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let response = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::<()>::internal_error("Database error")
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                ApiResponse::<()>::internal_error("Connection error")
            }
            AppError::Redis(ref e) => {
                tracing::error!("Redis error: {}", e);
                ApiResponse::<()>::internal_error("Cache error")
            }
            AppError::Auth { ref message, code } => ApiResponse::<()>::error(401, code, message),
            AppError::Forbidden { ref message, code } => {
                ApiResponse::<()>::error(403, code, message)
            }
            AppError::Validation { ref message } => ApiResponse::<()>::bad_request(message),
            AppError::InvalidInput(errors) => ApiResponse::<()>::validation_error(errors),
            AppError::NotFound { ref resource } => {
                ApiResponse::<()>::not_found(&format!("{} not found", resource))
            }
            AppError::Duplicate {
                ref message,
                ref field,
                ref code,
            } => ApiResponse::<()>::duplicate(message, field.clone(), code),
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                ApiResponse::<()>::internal_error("Configuration error")
            }
            AppError::Jwt(ref e) => {
                tracing::debug!("JWT rejected: {}", e);
                ApiResponse::<()>::unauthorized("Invalid or expired token")
            }
            AppError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {}", e);
                ApiResponse::<()>::internal_error("Password processing error")
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ApiResponse::<()>::internal_error("Internal server error")
            }
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// 便捷的错误创建函数
impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            code: "UNAUTHORIZED",
        }
    }

    pub fn auth_with_code(message: impl Into<String>, code: &'static str) -> Self {
        Self::Auth {
            message: message.into(),
            code,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            code: "FORBIDDEN",
        }
    }

    pub fn forbidden_with_code(message: impl Into<String>, code: &'static str) -> Self {
        Self::Forbidden {
            message: message.into(),
            code,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn duplicate_with_code(
        message: impl Into<String>,
        field: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            message: message.into(),
            field,
            code: code.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AppError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::duplicate_with_code("dup", None, "DUP").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::auth("no").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::forbidden("no").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("user").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn diesel_not_found_maps_to_404() {
        let err: AppError = DieselError::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_response_keeps_status() {
        let response = AppError::forbidden("Not your complaint").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
