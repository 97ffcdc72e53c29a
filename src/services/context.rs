use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl RequestContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin access required"))
        }
    }

    /// Admins pass; residents pass only for rows they own.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}
