use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{EntityType, NotificationType},
    db::models::api::{PageParams, Paged},
    db::models::notice::{
        CreateNoticeRequest, NewNotice, Notice, NoticeQuery, UpdateNotice, UpdateNoticeRequest,
    },
    db::models::notification::NewNotification,
    db::repositories::{NoticeFilters, NoticeRepo},
    error::AppError,
    services::context::RequestContext,
    services::notifications_service::NotificationsService,
    validation::notice::{validate_expiry, validate_update_notice},
    validation::trimmed_text,
};

/// Residents hear about a notice when it is published active, or when an
/// edit switches an inactive one on.
pub fn becomes_active(was_active: bool, requested: Option<bool>) -> bool {
    !was_active && requested == Some(true)
}

fn announcement(notice: &Notice, admin_id: Uuid) -> NewNotification {
    NewNotification::new(
        admin_id,
        NotificationType::Notice,
        format!("New notice: {}", notice.title),
        format!("A new {} notice has been posted", notice.category),
    )
    .related_to(EntityType::Notice, notice.id)
}

pub struct NoticesService;

impl NoticesService {
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &NoticeQuery,
    ) -> Result<Paged<Notice>, AppError> {
        let params = PageParams::new(query.page, query.limit);

        // 住户只能看到有效且未过期的公告
        let filters = if ctx.is_admin() {
            NoticeFilters {
                visible_at: None,
                is_active: query.is_active,
                category: query.category,
                priority: query.priority,
            }
        } else {
            NoticeFilters {
                visible_at: Some(Utc::now()),
                is_active: None,
                category: query.category,
                priority: query.priority,
            }
        };

        let (items, total) = NoticeRepo::list(conn, &filters, params)?;
        Ok(Paged { items, total, params })
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        notice_id: Uuid,
    ) -> Result<Notice, AppError> {
        let notice = NoticeRepo::find_by_id(conn, notice_id)?
            .ok_or_else(|| AppError::not_found("Notice"))?;

        if !ctx.is_admin() && !notice.is_visible_at(Utc::now()) {
            return Err(AppError::not_found("Notice"));
        }
        Ok(notice)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateNoticeRequest,
    ) -> Result<Notice, AppError> {
        ctx.require_admin()?;
        validate_expiry(req.expiry_date, Utc::now())?;

        let new_notice = NewNotice {
            title: trimmed_text("title", &req.title, 3, 200)?,
            content: trimmed_text("content", &req.content, 10, 5000)?,
            category: req.category,
            priority: req.priority,
            is_active: req.is_active.unwrap_or(true),
            expiry_date: req.expiry_date,
            created_by: ctx.user_id,
        };

        let (notice, recipients) = conn.transaction::<_, AppError, _>(|conn| {
            let notice = NoticeRepo::insert(conn, &new_notice)?;

            let recipients = if notice.is_active {
                NotificationsService::notify_residents(conn, &announcement(&notice, ctx.user_id))?
            } else {
                0
            };

            Ok((notice, recipients))
        })?;

        tracing::info!(
            notice_id = %notice.id,
            admin_id = %ctx.user_id,
            recipients,
            "Notice published"
        );
        Ok(notice)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        notice_id: Uuid,
        req: &UpdateNoticeRequest,
    ) -> Result<Notice, AppError> {
        ctx.require_admin()?;
        validate_update_notice(req, Utc::now())?;

        let existing = NoticeRepo::find_by_id(conn, notice_id)?
            .ok_or_else(|| AppError::not_found("Notice"))?;

        let changes = UpdateNotice {
            title: req
                .title
                .as_deref()
                .map(|t| trimmed_text("title", t, 3, 200))
                .transpose()?,
            content: req
                .content
                .as_deref()
                .map(|c| trimmed_text("content", c, 10, 5000))
                .transpose()?,
            category: req.category,
            priority: req.priority,
            is_active: req.is_active,
            expiry_date: req.expiry_date,
            updated_at: Some(Utc::now()),
        };

        let (notice, recipients) = conn.transaction::<_, AppError, _>(|conn| {
            let notice = NoticeRepo::update_fields(conn, notice_id, &changes)?;

            let recipients = if becomes_active(existing.is_active, req.is_active) {
                NotificationsService::notify_residents(conn, &announcement(&notice, ctx.user_id))?
            } else {
                0
            };

            Ok((notice, recipients))
        })?;

        if recipients > 0 {
            tracing::info!(
                notice_id = %notice.id,
                admin_id = %ctx.user_id,
                recipients,
                "Notice activated"
            );
        }
        Ok(notice)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        notice_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;

        if NoticeRepo::delete_by_id(conn, notice_id)? == 0 {
            return Err(AppError::not_found("Notice"));
        }
        Ok(())
    }
}
