use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{ComplaintCategory, ComplaintStatus, Priority};
use crate::utils::AssetUrlHelper;

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Complaint {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub attachment: Option<String>,
    pub admin_response: Option<String>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    pub fn with_asset_urls(mut self, asset_helper: &AssetUrlHelper) -> Self {
        self.attachment = self
            .attachment
            .map(|path| asset_helper.process_url(&path));
        self
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::complaints)]
pub struct NewComplaint {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub attachment: Option<String>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::complaints)]
pub struct UpdateComplaint {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ComplaintCategory>,
    pub priority: Option<Priority>,
    pub attachment: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Columns touched by an admin status change. `None` inside the nested
/// options clears the column.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::complaints)]
pub struct ComplaintStatusChange {
    pub status: ComplaintStatus,
    pub admin_response: Option<String>,
    pub resolved_by: Option<Option<Uuid>>,
    pub resolved_at: Option<Option<DateTime<Utc>>>,
    pub updated_at: DateTime<Utc>,
}

/// Complaint joined with the filing resident's name and flat.
#[derive(Serialize, Debug)]
pub struct ComplaintWithOwner {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub owner_name: String,
    pub owner_wing: String,
    pub owner_flat_number: String,
}

impl ComplaintWithOwner {
    pub fn with_asset_urls(mut self, asset_helper: &AssetUrlHelper) -> Self {
        self.complaint = self.complaint.with_asset_urls(asset_helper);
        self
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 2000, message = "Description must be between 10 and 2000 characters"))]
    pub description: String,

    pub category: ComplaintCategory,

    #[serde(default)]
    pub priority: Priority,

    pub attachment: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateComplaintRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 2000, message = "Description must be between 10 and 2000 characters"))]
    pub description: Option<String>,

    pub category: Option<ComplaintCategory>,

    pub priority: Option<Priority>,

    pub attachment: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,

    #[validate(length(max = 2000, message = "Admin response must be at most 2000 characters"))]
    pub admin_response: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ComplaintQuery {
    pub status: Option<ComplaintStatus>,
    pub category: Option<ComplaintCategory>,
    pub priority: Option<Priority>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
