// Unit tests focus on pure validation and token handling

use nivasa_backend::config::AuthConfig;
use nivasa_backend::db::enums::{UserRole, UserStatus};
use nivasa_backend::db::models::AuthUser;
use nivasa_backend::middleware::TokenService;
use nivasa_backend::validation::auth::{
    UpdateProfileChanges, normalize_email, validate_password_change, validate_update_profile,
};
use uuid::Uuid;

#[test]
fn validate_profile_and_password_inputs() {
    assert_eq!(normalize_email(" Priya@Society.IN"), "priya@society.in");

    let ok_changes = UpdateProfileChanges {
        name: None,
        phone: Some("9876543210"),
        occupation: None,
        profile_photo: None,
    };
    assert!(validate_update_profile(&ok_changes).is_ok());

    let empty_changes = UpdateProfileChanges {
        name: None,
        phone: None,
        occupation: None,
        profile_photo: None,
    };
    assert!(validate_update_profile(&empty_changes).is_err());

    assert!(validate_password_change("old-pass", "new-pass").is_ok());
    assert!(validate_password_change("old-pass", "old-pass").is_err());
    assert!(validate_password_change("old-pass", "12345").is_err());
}

#[test]
fn token_carries_identity_and_role() {
    let service = TokenService::new(&AuthConfig {
        jwt_secret: "unit-test-secret".to_string(),
        token_expires_in: 600,
        bcrypt_cost: 4,
    });
    let admin = AuthUser {
        id: Uuid::new_v4(),
        email: "secretary@society.in".to_string(),
        name: "Society Secretary".to_string(),
        role: UserRole::Admin,
        status: UserStatus::Approved,
        wing: "ADMIN".to_string(),
        flat_number: "OFFICE".to_string(),
    };

    let token = service.generate_token(&admin).unwrap();
    let claims = service.verify_token(&token).unwrap();

    assert_eq!(claims.sub, admin.id);
    assert_eq!(claims.role, UserRole::Admin);
    assert_eq!(service.expires_in(), 600);
    assert!(service.verify_token(&format!("{}x", token)).is_err());
}
