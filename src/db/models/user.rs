use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{ResidentType, UserRole, UserStatus};
use crate::utils::AssetUrlHelper;
use crate::validation::rules::validate_phone;

// User models
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub wing: String,
    pub flat_number: String,
    pub resident_type: ResidentType,
    pub role: UserRole,
    pub status: UserStatus,
    pub rejection_reason: Option<String>,
    pub profile_photo: Option<String>,
    pub occupation: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub wing: String,
    pub flat_number: String,
    pub resident_type: ResidentType,
    pub role: UserRole,
    pub status: UserStatus,
    pub occupation: Option<String>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub profile_photo: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserStatusChange {
    pub status: UserStatus,
    pub rejection_reason: Option<Option<String>>,
    pub approved_by: Option<Option<Uuid>>,
    pub approved_at: Option<Option<DateTime<Utc>>>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user; never carries the password hash.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub wing: String,
    pub flat_number: String,
    pub resident_type: ResidentType,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub profile_photo: Option<String>,
    pub occupation: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            wing: user.wing,
            flat_number: user.flat_number,
            resident_type: user.resident_type,
            role: user.role,
            status: user.status,
            rejection_reason: user.rejection_reason,
            profile_photo: user.profile_photo,
            occupation: user.occupation,
            approved_at: user.approved_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl UserResponse {
    /// 将头像路径转换为完整 URL
    pub fn with_asset_urls(mut self, asset_helper: &AssetUrlHelper) -> Self {
        self.profile_photo = self
            .profile_photo
            .map(|path| asset_helper.process_url(&path));
        self
    }
}

/// Identity attached to an authenticated request and cached in Redis.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub wing: String,
    pub flat_number: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            status: user.status,
            wing: user.wing.clone(),
            flat_number: user.flat_number.clone(),
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 1, max = 10, message = "Wing is required"))]
    pub wing: String,

    #[validate(length(min = 1, max = 10, message = "Flat number is required"))]
    pub flat_number: String,

    pub resident_type: ResidentType,

    #[validate(length(max = 100, message = "Occupation must be at most 100 characters"))]
    pub occupation: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 100, message = "Occupation must be at most 100 characters"))]
    pub occupation: Option<String>,

    pub profile_photo: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 6, max = 128, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateUserStatusRequest {
    pub status: UserStatus,

    #[validate(length(max = 500, message = "Rejection reason must be at most 500 characters"))]
    pub rejection_reason: Option<String>,
}

/// Admin view of a resident with everything that references them.
#[derive(Serialize, Debug)]
pub struct UserDetail {
    pub user: UserResponse,
    pub family_members: Vec<super::family_member::FamilyMember>,
    pub vehicles: Vec<super::vehicle::Vehicle>,
    pub complaints: Vec<super::complaint::Complaint>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UserQuery {
    pub status: Option<UserStatus>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
