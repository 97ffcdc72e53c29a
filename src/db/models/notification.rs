use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{EntityType, NotificationType};

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub related_entity_type: Option<EntityType>,
    pub related_entity_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub related_entity_type: Option<EntityType>,
    pub related_entity_id: Option<Uuid>,
}

impl NewNotification {
    pub fn new(
        user_id: Uuid,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            message: message.into(),
            notification_type,
            related_entity_type: None,
            related_entity_id: None,
        }
    }

    pub fn related_to(mut self, entity_type: EntityType, entity_id: Uuid) -> Self {
        self.related_entity_type = Some(entity_type);
        self.related_entity_id = Some(entity_id);
        self
    }

    /// Same message addressed to another user.
    pub fn for_user(&self, user_id: Uuid) -> Self {
        Self {
            user_id,
            ..self.clone()
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct SendNotificationRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters"))]
    pub message: String,

    #[serde(default)]
    pub notification_type: NotificationType,
}

#[derive(Deserialize, Validate, Debug)]
pub struct BroadcastNotificationRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters"))]
    pub message: String,

    #[serde(default)]
    pub notification_type: NotificationType,
}

#[derive(Serialize, Debug)]
pub struct BroadcastResult {
    pub recipients: usize,
}

#[derive(Serialize, Debug)]
pub struct UnreadCount {
    pub unread: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct NotificationQuery {
    pub unread_only: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_related_entity() {
        let complaint_id = Uuid::new_v4();
        let n = NewNotification::new(
            Uuid::new_v4(),
            NotificationType::Complaint,
            "Complaint updated",
            "Your complaint is now in progress",
        )
        .related_to(EntityType::Complaint, complaint_id);

        assert_eq!(n.related_entity_type, Some(EntityType::Complaint));
        assert_eq!(n.related_entity_id, Some(complaint_id));
    }

    #[test]
    fn for_user_only_changes_recipient() {
        let template = NewNotification::new(
            Uuid::new_v4(),
            NotificationType::Notice,
            "New notice",
            "Lift maintenance",
        );
        let other = Uuid::new_v4();
        let copy = template.for_user(other);
        assert_eq!(copy.user_id, other);
        assert_eq!(copy.title, template.title);
        assert_eq!(copy.notification_type, NotificationType::Notice);
    }
}
