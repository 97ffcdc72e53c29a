use chrono::Utc;
use nivasa_backend::db::enums::{ApprovalStatus, VehicleType};
use nivasa_backend::db::models::UpdateVehicleRequest;
use nivasa_backend::services::vehicles_service::{vehicle_edit, vehicle_status_change};
use nivasa_backend::validation::vehicle::{
    normalize_registration_number, validate_registration_number,
};
use uuid::Uuid;

#[test]
fn registration_numbers_normalize_before_validation() {
    let plate = normalize_registration_number("mh 01 ab 4321");
    assert_eq!(plate, "MH01AB4321");
    assert!(validate_registration_number(&plate).is_ok());
    assert!(validate_registration_number(&normalize_registration_number("mh/01")).is_err());
}

#[test]
fn any_edit_sends_vehicle_back_to_pending() {
    let req = UpdateVehicleRequest {
        vehicle_type: None,
        registration_number: None,
        make: None,
        model: None,
        color: Some(" Silver ".to_string()),
        parking_slot: None,
    };

    let edit = vehicle_edit(&req, None, Utc::now());
    assert_eq!(edit.status, ApprovalStatus::Pending);
    assert_eq!(edit.color.as_deref(), Some("Silver"));
    assert_eq!(edit.approved_by, Some(None));
    assert_eq!(edit.approved_at, Some(None));
    assert_eq!(edit.rejection_reason, Some(None));

    let req = UpdateVehicleRequest {
        vehicle_type: Some(VehicleType::Bike),
        ..req
    };
    let edit = vehicle_edit(&req, Some("MH01AB4321".to_string()), Utc::now());
    assert_eq!(edit.vehicle_type, Some(VehicleType::Bike));
    assert_eq!(edit.registration_number.as_deref(), Some("MH01AB4321"));
}

#[test]
fn rejection_keeps_the_reason() {
    let change = vehicle_status_change(
        ApprovalStatus::Rejected,
        Some("No parking slot available".to_string()),
        Uuid::new_v4(),
        Utc::now(),
    );
    assert_eq!(change.status, ApprovalStatus::Rejected);
    assert_eq!(
        change.rejection_reason,
        Some(Some("No parking slot available".to_string()))
    );
    assert_eq!(change.approved_by, Some(None));
}
