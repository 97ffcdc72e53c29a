use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{ApprovalStatus, VehicleType};

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub parking_slot: Option<String>,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct NewVehicle {
    pub user_id: Uuid,
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub parking_slot: Option<String>,
    pub status: ApprovalStatus,
}

/// Resident-side edit. Every edit sends the vehicle back for approval, so
/// the approval columns are always written alongside the changed fields.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct VehicleEdit {
    pub vehicle_type: Option<VehicleType>,
    pub registration_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub parking_slot: Option<String>,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<Option<String>>,
    pub approved_by: Option<Option<Uuid>>,
    pub approved_at: Option<Option<DateTime<Utc>>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct VehicleStatusChange {
    pub status: ApprovalStatus,
    pub rejection_reason: Option<Option<String>>,
    pub approved_by: Option<Option<Uuid>>,
    pub approved_at: Option<Option<DateTime<Utc>>>,
    pub updated_at: DateTime<Utc>,
}

/// Vehicle joined with its owner's name and flat, for the admin listing.
#[derive(Serialize, Debug)]
pub struct VehicleWithOwner {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub owner_name: String,
    pub owner_wing: String,
    pub owner_flat_number: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateVehicleRequest {
    pub vehicle_type: VehicleType,

    #[validate(length(min = 4, max = 20, message = "Registration number must be between 4 and 20 characters"))]
    pub registration_number: String,

    #[validate(length(min = 1, max = 50, message = "Make is required"))]
    pub make: String,

    #[validate(length(min = 1, max = 50, message = "Model is required"))]
    pub model: String,

    #[validate(length(min = 1, max = 30, message = "Color is required"))]
    pub color: String,

    #[validate(length(max = 20, message = "Parking slot must be at most 20 characters"))]
    pub parking_slot: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateVehicleRequest {
    pub vehicle_type: Option<VehicleType>,

    #[validate(length(min = 4, max = 20, message = "Registration number must be between 4 and 20 characters"))]
    pub registration_number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Make cannot be empty"))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Model cannot be empty"))]
    pub model: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Color cannot be empty"))]
    pub color: Option<String>,

    #[validate(length(max = 20, message = "Parking slot must be at most 20 characters"))]
    pub parking_slot: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateVehicleStatusRequest {
    pub status: ApprovalStatus,

    #[validate(length(max = 500, message = "Rejection reason must be at most 500 characters"))]
    pub rejection_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VehicleQuery {
    pub status: Option<ApprovalStatus>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
