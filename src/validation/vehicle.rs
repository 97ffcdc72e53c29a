use crate::error::AppError;
use crate::validation::trimmed_text;

/// Plates are stored without whitespace and uppercased so `mh 12 ab 1234`
/// and `MH12AB1234` collide.
pub fn normalize_registration_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

pub fn validate_registration_number(plate: &str) -> Result<(), AppError> {
    if plate.len() < 4 || plate.len() > 20 {
        return Err(AppError::validation(
            "Registration number must be between 4 and 20 characters",
        ));
    }
    if !plate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AppError::validation(
            "Registration number may only contain letters, digits and hyphens",
        ));
    }
    Ok(())
}

pub struct UpdateVehicleChanges<'a> {
    pub vehicle_type_present: bool,
    pub registration_number: Option<&'a str>,
    pub make: Option<&'a str>,
    pub model: Option<&'a str>,
    pub color: Option<&'a str>,
    pub parking_slot: Option<&'a str>,
}

pub fn validate_update_vehicle(changes: &UpdateVehicleChanges) -> Result<(), AppError> {
    if !changes.vehicle_type_present
        && changes.registration_number.is_none()
        && changes.make.is_none()
        && changes.model.is_none()
        && changes.color.is_none()
        && changes.parking_slot.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }
    if let Some(make) = changes.make {
        trimmed_text("make", make, 1, 50)?;
    }
    if let Some(model) = changes.model {
        trimmed_text("model", model, 1, 50)?;
    }
    if let Some(color) = changes.color {
        trimmed_text("color", color, 1, 30)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plates_are_normalized() {
        assert_eq!(normalize_registration_number(" mh 12 ab 1234 "), "MH12AB1234");
        assert_eq!(normalize_registration_number("KA-01-x-9"), "KA-01-X-9");
    }

    #[test]
    fn plate_format() {
        assert!(validate_registration_number("MH12AB1234").is_ok());
        assert!(validate_registration_number("MH-12").is_ok());
        assert!(validate_registration_number("AB1").is_err());
        assert!(validate_registration_number("MH12#1234").is_err());
    }

    #[test]
    fn update_needs_a_field() {
        let empty = UpdateVehicleChanges {
            vehicle_type_present: false,
            registration_number: None,
            make: None,
            model: None,
            color: None,
            parking_slot: None,
        };
        assert!(validate_update_vehicle(&empty).is_err());

        let color_only = UpdateVehicleChanges {
            color: Some("Red"),
            ..empty
        };
        assert!(validate_update_vehicle(&color_only).is_ok());
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let blank_make = UpdateVehicleChanges {
            vehicle_type_present: false,
            registration_number: None,
            make: Some("   "),
            model: None,
            color: None,
            parking_slot: None,
        };
        assert!(validate_update_vehicle(&blank_make).is_err());

        let padded_model = UpdateVehicleChanges {
            make: None,
            model: Some("  Swift  "),
            ..blank_make
        };
        assert!(validate_update_vehicle(&padded_model).is_ok());
    }
}
