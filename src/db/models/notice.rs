use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{NoticeCategory, Priority};

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::notices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub priority: Priority,
    pub is_active: bool,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notice {
    /// Whether residents may currently see this notice.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expiry_date.map_or(true, |expiry| expiry > now)
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notices)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub priority: Priority,
    pub is_active: bool,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::notices)]
pub struct UpdateNotice {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<NoticeCategory>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
    pub expiry_date: Option<Option<DateTime<Utc>>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateNoticeRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 5000, message = "Content must be between 10 and 5000 characters"))]
    pub content: String,

    #[serde(default = "default_notice_category")]
    pub category: NoticeCategory,

    #[serde(default)]
    pub priority: Priority,

    pub is_active: Option<bool>,

    pub expiry_date: Option<DateTime<Utc>>,
}

fn default_notice_category() -> NoticeCategory {
    NoticeCategory::General
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateNoticeRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 5000, message = "Content must be between 10 and 5000 characters"))]
    pub content: Option<String>,

    pub category: Option<NoticeCategory>,

    pub priority: Option<Priority>,

    pub is_active: Option<bool>,

    /// Absent leaves the expiry untouched, `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub expiry_date: Option<Option<DateTime<Utc>>>,
}

fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, Debug, Default)]
pub struct NoticeQuery {
    pub category: Option<NoticeCategory>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn notice(is_active: bool, expiry_date: Option<DateTime<Utc>>) -> Notice {
        let now = Utc::now();
        Notice {
            id: Uuid::new_v4(),
            title: "Water shutdown".to_string(),
            content: "Tank cleaning on Sunday morning".to_string(),
            category: NoticeCategory::Maintenance,
            priority: Priority::High,
            is_active,
            expiry_date,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn visibility_respects_active_flag_and_expiry() {
        let now = Utc::now();
        assert!(notice(true, None).is_visible_at(now));
        assert!(notice(true, Some(now + Duration::days(1))).is_visible_at(now));
        assert!(!notice(true, Some(now - Duration::days(1))).is_visible_at(now));
        assert!(!notice(false, None).is_visible_at(now));
    }

    #[test]
    fn update_request_distinguishes_null_from_absent() {
        let absent: UpdateNoticeRequest = serde_json::from_str(r#"{"title":"New title"}"#).unwrap();
        assert!(absent.expiry_date.is_none());

        let cleared: UpdateNoticeRequest =
            serde_json::from_str(r#"{"expiry_date":null}"#).unwrap();
        assert_eq!(cleared.expiry_date, Some(None));

        let set: UpdateNoticeRequest =
            serde_json::from_str(r#"{"expiry_date":"2030-01-01T00:00:00Z"}"#).unwrap();
        assert!(matches!(set.expiry_date, Some(Some(_))));
    }
}
