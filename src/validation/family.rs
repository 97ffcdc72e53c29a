use crate::db::models::family_member::UpdateFamilyMemberRequest;
use crate::error::AppError;

pub fn validate_update_family_member(req: &UpdateFamilyMemberRequest) -> Result<(), AppError> {
    if req.name.is_none()
        && req.relation.is_none()
        && req.age.is_none()
        && req.gender.is_none()
        && req.phone.is_none()
        && req.email.is_none()
        && req.occupation.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }
    Ok(())
}
