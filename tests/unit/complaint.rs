use chrono::Utc;
use nivasa_backend::config::AssetsConfig;
use nivasa_backend::db::enums::{ComplaintCategory, ComplaintStatus, Priority};
use nivasa_backend::db::models::Complaint;
use nivasa_backend::utils::AssetUrlHelper;
use nivasa_backend::validation::complaint::ensure_resident_can_modify;
use uuid::Uuid;

fn complaint(attachment: Option<&str>) -> Complaint {
    let now = Utc::now();
    Complaint {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        title: "Lift stuck".to_string(),
        description: "Lift in B wing stuck on 4th floor".to_string(),
        category: ComplaintCategory::Maintenance,
        priority: Priority::High,
        status: ComplaintStatus::Pending,
        attachment: attachment.map(str::to_string),
        admin_response: None,
        resolved_by: None,
        resolved_at: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn residents_only_touch_pending_complaints() {
    assert!(ensure_resident_can_modify(ComplaintStatus::Pending).is_ok());
    assert!(ensure_resident_can_modify(ComplaintStatus::InProgress).is_err());
    assert!(ensure_resident_can_modify(ComplaintStatus::Resolved).is_err());
    assert!(ensure_resident_can_modify(ComplaintStatus::Closed).is_err());
}

#[test]
fn attachments_resolve_against_uploads_base() {
    let helper = AssetUrlHelper::new(&AssetsConfig {
        base_url: "https://nivasa.example/uploads".to_string(),
    });

    let relative = complaint(Some("complaints/lift.jpg")).with_asset_urls(&helper);
    assert_eq!(
        relative.attachment.as_deref(),
        Some("https://nivasa.example/uploads/complaints/lift.jpg")
    );

    let absolute = complaint(Some("https://cdn.example.com/lift.jpg")).with_asset_urls(&helper);
    assert_eq!(
        absolute.attachment.as_deref(),
        Some("https://cdn.example.com/lift.jpg")
    );

    assert!(complaint(None).with_asset_urls(&helper).attachment.is_none());
}
