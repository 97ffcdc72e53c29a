use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{ComplaintStatus, EntityType, NotificationType},
    db::models::api::{PageParams, Paged},
    db::models::complaint::{
        Complaint, ComplaintQuery, ComplaintStatusChange, ComplaintWithOwner,
        CreateComplaintRequest, NewComplaint, UpdateComplaint, UpdateComplaintRequest,
        UpdateComplaintStatusRequest,
    },
    db::models::notification::NewNotification,
    db::repositories::{ComplaintFilters, ComplaintRepo, NotificationRepo},
    error::AppError,
    services::context::RequestContext,
    services::notifications_service::NotificationsService,
    validation::complaint::{
        ensure_resident_can_modify, validate_update_complaint, UpdateComplaintChanges,
    },
    validation::trimmed_text,
};

/// Column changes for an admin moving `current` to `status`.
///
/// Resolving stamps the resolver, reopening clears it, closing keeps an
/// existing stamp and adds one when the complaint was never resolved.
pub fn complaint_status_change(
    current: &Complaint,
    status: ComplaintStatus,
    admin_response: Option<String>,
    admin_id: Uuid,
    now: DateTime<Utc>,
) -> ComplaintStatusChange {
    let (resolved_by, resolved_at) = match status {
        ComplaintStatus::Resolved => (Some(Some(admin_id)), Some(Some(now))),
        ComplaintStatus::Pending | ComplaintStatus::InProgress => (Some(None), Some(None)),
        ComplaintStatus::Closed => {
            if current.resolved_at.is_some() {
                (None, None)
            } else {
                (Some(Some(admin_id)), Some(Some(now)))
            }
        }
    };

    ComplaintStatusChange {
        status,
        admin_response: admin_response
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
        resolved_by,
        resolved_at,
        updated_at: now,
    }
}

pub struct ComplaintsService;

impl ComplaintsService {
    fn load(conn: &mut PgConnection, complaint_id: Uuid) -> Result<Complaint, AppError> {
        ComplaintRepo::find_by_id(conn, complaint_id)?
            .ok_or_else(|| AppError::not_found("Complaint"))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateComplaintRequest,
    ) -> Result<Complaint, AppError> {
        if ctx.is_admin() {
            return Err(AppError::forbidden("Only residents can file complaints"));
        }

        let new_complaint = NewComplaint {
            user_id: ctx.user_id,
            title: trimmed_text("title", &req.title, 3, 200)?,
            description: trimmed_text("description", &req.description, 10, 2000)?,
            category: req.category,
            priority: req.priority,
            status: ComplaintStatus::Pending,
            attachment: req.attachment.clone(),
        };

        let complaint = conn.transaction::<_, AppError, _>(|conn| {
            let complaint = ComplaintRepo::insert(conn, &new_complaint)?;

            let template = NewNotification::new(
                ctx.user_id,
                NotificationType::Complaint,
                "New complaint filed",
                format!("{} ({} priority): {}", complaint.category, complaint.priority, complaint.title),
            )
            .related_to(EntityType::Complaint, complaint.id);
            NotificationsService::notify_admins(conn, &template)?;

            Ok(complaint)
        })?;

        tracing::info!(complaint_id = %complaint.id, user_id = %ctx.user_id, "Complaint filed");
        Ok(complaint)
    }

    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &ComplaintQuery,
    ) -> Result<Paged<ComplaintWithOwner>, AppError> {
        let params = PageParams::new(query.page, query.limit);
        let filters = ComplaintFilters {
            user_id: if ctx.is_admin() { None } else { Some(ctx.user_id) },
            status: query.status,
            category: query.category,
            priority: query.priority,
        };

        let (items, total) = ComplaintRepo::list(conn, &filters, params)?;
        Ok(Paged { items, total, params })
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        complaint_id: Uuid,
    ) -> Result<Complaint, AppError> {
        let complaint = Self::load(conn, complaint_id)?;
        if !ctx.can_access(complaint.user_id) {
            return Err(AppError::forbidden("You can only view your own complaints"));
        }
        Ok(complaint)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        complaint_id: Uuid,
        req: &UpdateComplaintRequest,
    ) -> Result<Complaint, AppError> {
        validate_update_complaint(&UpdateComplaintChanges {
            title: req.title.as_deref(),
            description: req.description.as_deref(),
            category_present: req.category.is_some(),
            priority_present: req.priority.is_some(),
            attachment: req.attachment.as_deref(),
        })?;

        let complaint = Self::load(conn, complaint_id)?;
        if complaint.user_id != ctx.user_id {
            return Err(AppError::forbidden("You can only edit your own complaints"));
        }
        ensure_resident_can_modify(complaint.status)?;

        let changes = UpdateComplaint {
            title: req
                .title
                .as_deref()
                .map(|t| trimmed_text("title", t, 3, 200))
                .transpose()?,
            description: req
                .description
                .as_deref()
                .map(|d| trimmed_text("description", d, 10, 2000))
                .transpose()?,
            category: req.category,
            priority: req.priority,
            attachment: req.attachment.clone(),
            updated_at: Some(Utc::now()),
        };

        Ok(ComplaintRepo::update_fields(conn, complaint_id, &changes)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        complaint_id: Uuid,
    ) -> Result<(), AppError> {
        let complaint = Self::load(conn, complaint_id)?;

        if !ctx.is_admin() {
            if complaint.user_id != ctx.user_id {
                return Err(AppError::forbidden("You can only delete your own complaints"));
            }
            ensure_resident_can_modify(complaint.status)?;
        }

        ComplaintRepo::delete_by_id(conn, complaint_id)?;
        Ok(())
    }

    pub fn update_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        complaint_id: Uuid,
        req: &UpdateComplaintStatusRequest,
    ) -> Result<Complaint, AppError> {
        ctx.require_admin()?;

        let current = Self::load(conn, complaint_id)?;
        let change = complaint_status_change(
            &current,
            req.status,
            req.admin_response.clone(),
            ctx.user_id,
            Utc::now(),
        );

        let complaint = conn.transaction::<_, AppError, _>(|conn| {
            let complaint = ComplaintRepo::update_status(conn, complaint_id, &change)?;

            let mut message = format!(
                "Your complaint \"{}\" is now {}",
                complaint.title, complaint.status
            );
            if let Some(response) = change.admin_response.as_deref() {
                message.push_str(&format!(". Response: {}", response));
            }
            NotificationRepo::insert(
                conn,
                &NewNotification::new(
                    complaint.user_id,
                    NotificationType::Complaint,
                    "Complaint status updated",
                    message,
                )
                .related_to(EntityType::Complaint, complaint.id),
            )?;

            Ok(complaint)
        })?;

        tracing::info!(
            complaint_id = %complaint.id,
            admin_id = %ctx.user_id,
            from = %current.status,
            to = %complaint.status,
            "Complaint status changed"
        );
        Ok(complaint)
    }
}
