use chrono::{DateTime, Utc};

use crate::db::models::notice::UpdateNoticeRequest;
use crate::error::AppError;

pub fn validate_expiry(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<(), AppError> {
    if let Some(expiry) = expiry {
        if expiry <= now {
            return Err(AppError::validation("Expiry date must be in the future"));
        }
    }
    Ok(())
}

pub fn validate_update_notice(req: &UpdateNoticeRequest, now: DateTime<Utc>) -> Result<(), AppError> {
    if req.title.is_none()
        && req.content.is_none()
        && req.category.is_none()
        && req.priority.is_none()
        && req.is_active.is_none()
        && req.expiry_date.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }
    if let Some(expiry) = req.expiry_date {
        validate_expiry(expiry, now)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_must_be_in_future() {
        let now = Utc::now();
        assert!(validate_expiry(None, now).is_ok());
        assert!(validate_expiry(Some(now + Duration::hours(1)), now).is_ok());
        assert!(validate_expiry(Some(now - Duration::hours(1)), now).is_err());
    }

    #[test]
    fn update_rules() {
        let now = Utc::now();
        let empty: UpdateNoticeRequest = serde_json::from_str("{}").unwrap();
        assert!(validate_update_notice(&empty, now).is_err());

        let deactivate: UpdateNoticeRequest =
            serde_json::from_str(r#"{"is_active": false}"#).unwrap();
        assert!(validate_update_notice(&deactivate, now).is_ok());

        let clear_expiry: UpdateNoticeRequest =
            serde_json::from_str(r#"{"expiry_date": null}"#).unwrap();
        assert!(validate_update_notice(&clear_expiry, now).is_ok());

        let past: UpdateNoticeRequest =
            serde_json::from_str(r#"{"expiry_date": "2001-01-01T00:00:00Z"}"#).unwrap();
        assert!(validate_update_notice(&past, now).is_err());
    }
}
