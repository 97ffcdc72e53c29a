pub mod auth;
pub mod complaint;
pub mod family;
pub mod notice;
pub mod vehicle;

use axum::{
    async_trait,
    extract::FromRequest,
    http::Request,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{db::models::api::ErrorDetail, error::AppError};

/// 验证的 JSON 提取器
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value.validate().map_err(|errors| {
            let error_details: Vec<ErrorDetail> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(move |error| ErrorDetail {
                        field: Some(field.to_string()),
                        code: error.code.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
                    })
                })
                .collect();

            AppError::InvalidInput(error_details)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Shared checks for approve/reject decisions on users and vehicles.
///
/// Returns the trimmed rejection reason to store, or `None` for approvals.
pub fn validate_approval_decision(
    rejecting: bool,
    approving: bool,
    rejection_reason: Option<&str>,
) -> Result<Option<String>, AppError> {
    if !rejecting && !approving {
        return Err(AppError::validation(
            "Status must be either approved or rejected",
        ));
    }

    if rejecting {
        let reason = rejection_reason.map(str::trim).unwrap_or_default();
        if reason.is_empty() {
            return Err(AppError::validation("Rejection reason is required"));
        }
        return Ok(Some(reason.to_string()));
    }

    Ok(None)
}

/// Length rules on free text are checked against the trimmed value, which
/// is what gets stored.
pub fn trimmed_text(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, AppError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        let mut label = field.to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        return Err(AppError::InvalidInput(vec![ErrorDetail {
            field: Some(field.to_string()),
            code: "length".to_string(),
            message: format!("{} must be between {} and {} characters", label, min, max),
        }]));
    }
    Ok(trimmed.to_string())
}

/// 常用验证规则
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    /// Indian mobile numbers: exactly ten digits.
    pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
        if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
            return Ok(());
        }
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(Cow::Borrowed("Phone number must be exactly 10 digits"));
        Err(error)
    }
}
