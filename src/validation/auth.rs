use crate::error::AppError;

/// Emails are compared case-insensitively, so they are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct UpdateProfileChanges<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub occupation: Option<&'a str>,
    pub profile_photo: Option<&'a str>,
}

pub fn validate_update_profile(changes: &UpdateProfileChanges) -> Result<(), AppError> {
    if changes.name.is_none()
        && changes.phone.is_none()
        && changes.occupation.is_none()
        && changes.profile_photo.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }

    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
    }

    Ok(())
}

pub fn validate_password_change(current: &str, new: &str) -> Result<(), AppError> {
    if new.len() < 6 {
        return Err(AppError::validation(
            "New password must be at least 6 characters",
        ));
    }

    if current == new {
        return Err(AppError::validation(
            "New password must differ from the current password",
        ));
    }

    Ok(())
}
