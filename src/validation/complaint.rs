use crate::db::enums::ComplaintStatus;
use crate::error::AppError;

/// Residents may only edit or withdraw a complaint nobody has picked up yet.
pub fn ensure_resident_can_modify(status: ComplaintStatus) -> Result<(), AppError> {
    if status != ComplaintStatus::Pending {
        return Err(AppError::validation(format!(
            "Complaint can only be modified while pending (current status: {})",
            status
        )));
    }
    Ok(())
}

pub struct UpdateComplaintChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category_present: bool,
    pub priority_present: bool,
    pub attachment: Option<&'a str>,
}

pub fn validate_update_complaint(changes: &UpdateComplaintChanges) -> Result<(), AppError> {
    if changes.title.is_none()
        && changes.description.is_none()
        && !changes.category_present
        && !changes.priority_present
        && changes.attachment.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }
    if let Some(title) = changes.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
    }
    if let Some(description) = changes.description {
        if description.trim().is_empty() {
            return Err(AppError::validation("Description cannot be empty"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_complaints_are_editable() {
        assert!(ensure_resident_can_modify(ComplaintStatus::Pending).is_ok());
        assert!(ensure_resident_can_modify(ComplaintStatus::InProgress).is_err());
        assert!(ensure_resident_can_modify(ComplaintStatus::Resolved).is_err());
        assert!(ensure_resident_can_modify(ComplaintStatus::Closed).is_err());
    }

    #[test]
    fn update_needs_at_least_one_field() {
        let c = UpdateComplaintChanges {
            title: None,
            description: None,
            category_present: false,
            priority_present: false,
            attachment: None,
        };
        assert!(validate_update_complaint(&c).is_err());

        let c = UpdateComplaintChanges {
            title: None,
            description: None,
            category_present: false,
            priority_present: true,
            attachment: None,
        };
        assert!(validate_update_complaint(&c).is_ok());

        let c = UpdateComplaintChanges {
            title: Some(" "),
            description: None,
            category_present: false,
            priority_present: false,
            attachment: None,
        };
        assert!(validate_update_complaint(&c).is_err());
    }
}
