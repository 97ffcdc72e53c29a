use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{UserRole, UserStatus},
    db::models::api::{PageParams, Paged},
    db::models::notification::{
        BroadcastNotificationRequest, BroadcastResult, NewNotification, Notification,
        NotificationQuery, SendNotificationRequest, UnreadCount,
    },
    db::repositories::{NotificationRepo, UserRepo},
    error::AppError,
    services::context::RequestContext,
    validation::trimmed_text,
};

pub struct NotificationsService;

impl NotificationsService {
    /// Fan a notification out to every approved admin.
    pub fn notify_admins(
        conn: &mut PgConnection,
        template: &NewNotification,
    ) -> Result<usize, AppError> {
        let admin_ids = UserRepo::ids_by_role_and_status(conn, UserRole::Admin, UserStatus::Approved)?;
        Self::fan_out(conn, template, &admin_ids)
    }

    /// Fan a notification out to every approved resident.
    pub fn notify_residents(
        conn: &mut PgConnection,
        template: &NewNotification,
    ) -> Result<usize, AppError> {
        let resident_ids =
            UserRepo::ids_by_role_and_status(conn, UserRole::Resident, UserStatus::Approved)?;
        Self::fan_out(conn, template, &resident_ids)
    }

    fn fan_out(
        conn: &mut PgConnection,
        template: &NewNotification,
        recipients: &[Uuid],
    ) -> Result<usize, AppError> {
        let batch: Vec<NewNotification> = recipients
            .iter()
            .map(|id| template.for_user(*id))
            .collect();
        Ok(NotificationRepo::insert_many(conn, &batch)?)
    }

    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &NotificationQuery,
    ) -> Result<Paged<Notification>, AppError> {
        let params = PageParams::new(query.page, query.limit);
        let (items, total) = NotificationRepo::list_for_user(
            conn,
            ctx.user_id,
            query.unread_only.unwrap_or(false),
            params,
        )?;
        Ok(Paged { items, total, params })
    }

    pub fn unread_count(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<UnreadCount, AppError> {
        let unread = NotificationRepo::count_unread(conn, ctx.user_id)?;
        Ok(UnreadCount { unread })
    }

    pub fn mark_read(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        NotificationRepo::mark_read(conn, ctx.user_id, notification_id)?
            .ok_or_else(|| AppError::not_found("Notification"))
    }

    pub fn mark_all_read(conn: &mut PgConnection, ctx: &RequestContext) -> Result<usize, AppError> {
        Ok(NotificationRepo::mark_all_read(conn, ctx.user_id)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        let deleted = NotificationRepo::delete_for_user(conn, ctx.user_id, notification_id)?;
        if deleted == 0 {
            return Err(AppError::not_found("Notification"));
        }
        Ok(())
    }

    pub fn send(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &SendNotificationRequest,
    ) -> Result<Notification, AppError> {
        ctx.require_admin()?;
        let title = trimmed_text("title", &req.title, 1, 200)?;
        let message = trimmed_text("message", &req.message, 1, 2000)?;

        if UserRepo::find_by_id(conn, req.user_id)?.is_none() {
            return Err(AppError::not_found("User"));
        }

        let notification = NotificationRepo::insert(
            conn,
            &NewNotification::new(req.user_id, req.notification_type, title, message),
        )?;

        tracing::info!(
            admin_id = %ctx.user_id,
            recipient = %req.user_id,
            "Notification sent"
        );
        Ok(notification)
    }

    pub fn broadcast(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &BroadcastNotificationRequest,
    ) -> Result<BroadcastResult, AppError> {
        ctx.require_admin()?;

        let template = NewNotification::new(
            ctx.user_id,
            req.notification_type,
            trimmed_text("title", &req.title, 1, 200)?,
            trimmed_text("message", &req.message, 1, 2000)?,
        );

        let recipients = conn.transaction::<_, AppError, _>(|conn| {
            Self::notify_residents(conn, &template)
        })?;

        tracing::info!(admin_id = %ctx.user_id, recipients, "Broadcast delivered");
        Ok(BroadcastResult { recipients })
    }
}
