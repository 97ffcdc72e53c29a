use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{ApprovalStatus, EntityType, NotificationType},
    db::models::api::{error_codes, PageParams, Paged},
    db::models::notification::NewNotification,
    db::models::vehicle::{
        CreateVehicleRequest, NewVehicle, UpdateVehicleRequest, UpdateVehicleStatusRequest,
        Vehicle, VehicleEdit, VehicleQuery, VehicleStatusChange, VehicleWithOwner,
    },
    db::repositories::{NotificationRepo, VehicleFilters, VehicleRepo},
    error::AppError,
    services::context::RequestContext,
    services::notifications_service::NotificationsService,
    validation::{trimmed_text, validate_approval_decision},
    validation::vehicle::{
        normalize_registration_number, validate_registration_number, validate_update_vehicle,
        UpdateVehicleChanges,
    },
};

/// Any resident edit sends the vehicle back to `pending` and wipes the
/// previous decision.
pub fn vehicle_edit(
    req: &UpdateVehicleRequest,
    registration_number: Option<String>,
    now: DateTime<Utc>,
) -> VehicleEdit {
    VehicleEdit {
        vehicle_type: req.vehicle_type,
        registration_number,
        make: req.make.as_ref().map(|m| m.trim().to_string()),
        model: req.model.as_ref().map(|m| m.trim().to_string()),
        color: req.color.as_ref().map(|c| c.trim().to_string()),
        parking_slot: req.parking_slot.clone(),
        status: ApprovalStatus::Pending,
        rejection_reason: Some(None),
        approved_by: Some(None),
        approved_at: Some(None),
        updated_at: now,
    }
}

pub fn vehicle_status_change(
    status: ApprovalStatus,
    rejection_reason: Option<String>,
    admin_id: Uuid,
    now: DateTime<Utc>,
) -> VehicleStatusChange {
    match status {
        ApprovalStatus::Approved => VehicleStatusChange {
            status,
            rejection_reason: Some(None),
            approved_by: Some(Some(admin_id)),
            approved_at: Some(Some(now)),
            updated_at: now,
        },
        _ => VehicleStatusChange {
            status,
            rejection_reason: Some(rejection_reason),
            approved_by: Some(None),
            approved_at: Some(None),
            updated_at: now,
        },
    }
}

fn plate_taken() -> AppError {
    AppError::duplicate_with_code(
        "You have already registered a vehicle with this registration number",
        Some("registration_number".to_string()),
        error_codes::VEHICLE_PLATE_EXISTS,
    )
}

pub struct VehiclesService;

impl VehiclesService {
    fn load(conn: &mut PgConnection, vehicle_id: Uuid) -> Result<Vehicle, AppError> {
        VehicleRepo::find_by_id(conn, vehicle_id)?.ok_or_else(|| AppError::not_found("Vehicle"))
    }

    pub fn list_mine(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Vehicle>, AppError> {
        Ok(VehicleRepo::list_by_user(conn, ctx.user_id)?)
    }

    pub fn list_all(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &VehicleQuery,
    ) -> Result<Paged<VehicleWithOwner>, AppError> {
        ctx.require_admin()?;

        let params = PageParams::new(query.page, query.limit);
        let filters = VehicleFilters {
            status: query.status,
            search: query.search.as_deref().map(normalize_registration_number),
        };
        let (items, total) = VehicleRepo::list_all(conn, &filters, params)?;
        Ok(Paged { items, total, params })
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        vehicle_id: Uuid,
    ) -> Result<Vehicle, AppError> {
        let vehicle = Self::load(conn, vehicle_id)?;
        if !ctx.can_access(vehicle.user_id) {
            return Err(AppError::forbidden("You can only view your own vehicles"));
        }
        Ok(vehicle)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let plate = normalize_registration_number(&req.registration_number);
        validate_registration_number(&plate)?;

        if VehicleRepo::exists_for_user(conn, ctx.user_id, &plate, None)? {
            return Err(plate_taken());
        }

        let new_vehicle = NewVehicle {
            user_id: ctx.user_id,
            vehicle_type: req.vehicle_type,
            registration_number: plate,
            make: trimmed_text("make", &req.make, 1, 50)?,
            model: trimmed_text("model", &req.model, 1, 50)?,
            color: trimmed_text("color", &req.color, 1, 30)?,
            parking_slot: req.parking_slot.clone(),
            status: ApprovalStatus::Pending,
        };

        let vehicle = conn.transaction::<_, AppError, _>(|conn| {
            let vehicle = VehicleRepo::insert(conn, &new_vehicle)?;

            let template = NewNotification::new(
                ctx.user_id,
                NotificationType::Vehicle,
                "New vehicle registration",
                format!(
                    "{} {} ({}) is awaiting approval",
                    vehicle.make, vehicle.model, vehicle.registration_number
                ),
            )
            .related_to(EntityType::Vehicle, vehicle.id);
            NotificationsService::notify_admins(conn, &template)?;

            Ok(vehicle)
        })?;

        tracing::info!(vehicle_id = %vehicle.id, user_id = %ctx.user_id, "Vehicle registered");
        Ok(vehicle)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        vehicle_id: Uuid,
        req: &UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        validate_update_vehicle(&UpdateVehicleChanges {
            vehicle_type_present: req.vehicle_type.is_some(),
            registration_number: req.registration_number.as_deref(),
            make: req.make.as_deref(),
            model: req.model.as_deref(),
            color: req.color.as_deref(),
            parking_slot: req.parking_slot.as_deref(),
        })?;

        let vehicle = Self::load(conn, vehicle_id)?;
        if vehicle.user_id != ctx.user_id {
            return Err(AppError::forbidden("You can only edit your own vehicles"));
        }

        let plate = match req.registration_number.as_deref() {
            Some(raw) => {
                let plate = normalize_registration_number(raw);
                validate_registration_number(&plate)?;
                if VehicleRepo::exists_for_user(conn, ctx.user_id, &plate, Some(vehicle.id))? {
                    return Err(plate_taken());
                }
                Some(plate)
            }
            None => None,
        };

        let edit = vehicle_edit(req, plate, Utc::now());
        let updated = VehicleRepo::apply_edit(conn, vehicle.id, &edit)?;

        tracing::info!(
            vehicle_id = %updated.id,
            previous_status = %vehicle.status,
            "Vehicle edited, approval reset"
        );
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        vehicle_id: Uuid,
    ) -> Result<(), AppError> {
        let vehicle = Self::load(conn, vehicle_id)?;
        if !ctx.can_access(vehicle.user_id) {
            return Err(AppError::forbidden("You can only delete your own vehicles"));
        }
        VehicleRepo::delete_by_id(conn, vehicle.id)?;
        Ok(())
    }

    pub fn update_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        vehicle_id: Uuid,
        req: &UpdateVehicleStatusRequest,
    ) -> Result<Vehicle, AppError> {
        ctx.require_admin()?;

        let reason = validate_approval_decision(
            req.status == ApprovalStatus::Rejected,
            req.status == ApprovalStatus::Approved,
            req.rejection_reason.as_deref(),
        )?;

        let current = Self::load(conn, vehicle_id)?;

        // 重复审批通过不产生新的变更
        if current.status == ApprovalStatus::Approved && req.status == ApprovalStatus::Approved {
            tracing::debug!(vehicle_id = %current.id, "Vehicle already approved");
            return Ok(current);
        }

        let change = vehicle_status_change(req.status, reason.clone(), ctx.user_id, Utc::now());

        let vehicle = conn.transaction::<_, AppError, _>(|conn| {
            let vehicle = VehicleRepo::update_status(conn, vehicle_id, &change)?;

            let message = match reason.as_deref() {
                None => format!("Your vehicle {} has been approved", vehicle.registration_number),
                Some(reason) => format!(
                    "Your vehicle {} was rejected: {}",
                    vehicle.registration_number, reason
                ),
            };
            NotificationRepo::insert(
                conn,
                &NewNotification::new(
                    vehicle.user_id,
                    NotificationType::Vehicle,
                    "Vehicle registration update",
                    message,
                )
                .related_to(EntityType::Vehicle, vehicle.id),
            )?;

            Ok(vehicle)
        })?;

        tracing::info!(
            vehicle_id = %vehicle.id,
            admin_id = %ctx.user_id,
            status = %vehicle.status,
            "Vehicle status updated"
        );
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_always_resets_approval() {
        let req: UpdateVehicleRequest = serde_json::from_str(r#"{"color": " Blue "}"#).unwrap();
        let edit = vehicle_edit(&req, None, Utc::now());

        assert_eq!(edit.status, ApprovalStatus::Pending);
        assert_eq!(edit.rejection_reason, Some(None));
        assert_eq!(edit.approved_by, Some(None));
        assert_eq!(edit.approved_at, Some(None));
        assert_eq!(edit.color.as_deref(), Some("Blue"));
        assert!(edit.registration_number.is_none());
    }

    #[test]
    fn status_change_for_each_decision() {
        let admin = Uuid::new_v4();
        let now = Utc::now();

        let approved = vehicle_status_change(ApprovalStatus::Approved, None, admin, now);
        assert_eq!(approved.approved_by, Some(Some(admin)));
        assert_eq!(approved.rejection_reason, Some(None));

        let rejected = vehicle_status_change(
            ApprovalStatus::Rejected,
            Some("Slot already allotted".to_string()),
            admin,
            now,
        );
        assert_eq!(rejected.approved_by, Some(None));
        assert_eq!(
            rejected.rejection_reason,
            Some(Some("Slot already allotted".to_string()))
        );
    }
}
