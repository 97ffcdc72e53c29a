use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{ApprovalStatus, EntityType, NotificationType, UserRole, UserStatus},
    db::models::api::{PageParams, Paged},
    db::models::dashboard::{ComplaintCounts, DashboardStats, ResidentCounts},
    db::models::notification::NewNotification,
    db::models::user::{UpdateUserStatusRequest, UserDetail, UserQuery, UserResponse, UserStatusChange},
    db::repositories::{
        ComplaintRepo, FamilyMemberRepo, NoticeRepo, NotificationRepo, UserFilters, UserRepo,
        VehicleRepo,
    },
    error::AppError,
    services::context::RequestContext,
    validation::validate_approval_decision,
};

/// Column changes for an approve/reject decision on a resident.
pub fn user_status_change(
    status: UserStatus,
    rejection_reason: Option<String>,
    admin_id: Uuid,
    now: DateTime<Utc>,
) -> UserStatusChange {
    match status {
        UserStatus::Approved => UserStatusChange {
            status,
            rejection_reason: Some(None),
            approved_by: Some(Some(admin_id)),
            approved_at: Some(Some(now)),
            updated_at: now,
        },
        _ => UserStatusChange {
            status,
            rejection_reason: Some(rejection_reason),
            approved_by: Some(None),
            approved_at: Some(None),
            updated_at: now,
        },
    }
}

/// Admins can remove residents only: never themselves or another admin.
pub fn ensure_deletable(
    actor_id: Uuid,
    target_id: Uuid,
    target_role: UserRole,
) -> Result<(), AppError> {
    if target_id == actor_id {
        return Err(AppError::validation("You cannot delete your own account"));
    }
    if target_role == UserRole::Admin {
        return Err(AppError::validation("Admin accounts cannot be deleted"));
    }
    Ok(())
}

pub struct AdminService;

impl AdminService {
    pub fn list_users(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &UserQuery,
    ) -> Result<Paged<UserResponse>, AppError> {
        ctx.require_admin()?;

        let params = PageParams::new(query.page, query.limit);
        let filters = UserFilters {
            status: query.status,
            search: query.search.clone(),
        };
        let (rows, total) = UserRepo::list_residents(conn, &filters, params)?;

        Ok(Paged {
            items: rows.into_iter().map(UserResponse::from).collect(),
            total,
            params,
        })
    }

    pub fn user_detail(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<UserDetail, AppError> {
        ctx.require_admin()?;

        let user = UserRepo::find_by_id(conn, user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(UserDetail {
            family_members: FamilyMemberRepo::list_by_user(conn, user.id)?,
            vehicles: VehicleRepo::list_by_user(conn, user.id)?,
            complaints: ComplaintRepo::list_by_user(conn, user.id)?,
            user: UserResponse::from(user),
        })
    }

    pub fn update_user_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        user_id: Uuid,
        req: &UpdateUserStatusRequest,
    ) -> Result<UserResponse, AppError> {
        ctx.require_admin()?;

        let reason = validate_approval_decision(
            req.status == UserStatus::Rejected,
            req.status == UserStatus::Approved,
            req.rejection_reason.as_deref(),
        )?;

        let existing = UserRepo::find_by_id(conn, user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        if existing.role == UserRole::Admin {
            return Err(AppError::validation("Cannot change the status of an admin account"));
        }

        let change = user_status_change(req.status, reason.clone(), ctx.user_id, Utc::now());

        let user = conn.transaction::<_, AppError, _>(|conn| {
            let user = UserRepo::update_status(conn, user_id, &change)?;

            let (title, message) = match req.status {
                UserStatus::Approved => (
                    "Registration approved",
                    "Your registration has been approved. You can now sign in.".to_string(),
                ),
                _ => (
                    "Registration rejected",
                    format!(
                        "Your registration was rejected: {}",
                        reason.as_deref().unwrap_or_default()
                    ),
                ),
            };
            NotificationRepo::insert(
                conn,
                &NewNotification::new(user.id, NotificationType::Approval, title, message)
                    .related_to(EntityType::User, user.id),
            )?;

            Ok(user)
        })?;

        tracing::info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            status = %user.status,
            "Resident status updated"
        );
        Ok(UserResponse::from(user))
    }

    pub fn delete_user(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;

        let user = UserRepo::find_by_id(conn, user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        ensure_deletable(ctx.user_id, user.id, user.role)?;

        UserRepo::delete_by_id(conn, user_id)?;
        tracing::info!(admin_id = %ctx.user_id, user_id = %user_id, "Resident deleted");
        Ok(())
    }

    pub fn dashboard(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<DashboardStats, AppError> {
        ctx.require_admin()?;

        Ok(DashboardStats {
            residents: ResidentCounts::from_rows(&UserRepo::count_residents_by_status(conn)?),
            complaints: ComplaintCounts::from_rows(&ComplaintRepo::count_by_status(conn)?),
            pending_vehicles: VehicleRepo::count_by_status(conn, ApprovalStatus::Pending)?,
            active_notices: NoticeRepo::count_visible(conn, Utc::now())?,
        })
    }
}
