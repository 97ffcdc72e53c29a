// Approve/reject decisions shared by resident and vehicle review

use nivasa_backend::validation::validate_approval_decision;

#[test]
fn rejection_requires_a_reason() {
    assert!(validate_approval_decision(true, false, None).is_err());
    assert!(validate_approval_decision(true, false, Some("   ")).is_err());
    assert_eq!(
        validate_approval_decision(true, false, Some("  Flat not found ")).unwrap(),
        Some("Flat not found".to_string())
    );
}

#[test]
fn approval_ignores_reason() {
    assert_eq!(
        validate_approval_decision(false, true, Some("whatever")).unwrap(),
        None
    );
    assert!(validate_approval_decision(false, false, None).is_err());
}
