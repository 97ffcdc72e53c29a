use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use super::{Session, admin_session, approved_resident, url};

async fn file_complaint(client: &Client, resident: &Session, title: &str) -> String {
    let response = client
        .post(url("/api/complaints"))
        .bearer_auth(&resident.token)
        .json(&json!({
            "title": title,
            "description": "Water leaking from the ceiling of the kitchen",
            "category": "plumbing",
            "priority": "medium",
        }))
        .send()
        .await
        .expect("Failed to create complaint");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires running server"]
async fn resident_cannot_view_another_residents_complaint() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let owner = approved_resident(&client, &admin).await;
    let neighbour = approved_resident(&client, &admin).await;

    let complaint_id = file_complaint(&client, &owner, "Kitchen leak").await;

    let response = client
        .get(url(&format!("/api/complaints/{}", complaint_id)))
        .bearer_auth(&neighbour.token)
        .send()
        .await
        .expect("Failed to fetch complaint");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .get(url(&format!("/api/complaints/{}", complaint_id)))
        .bearer_auth(&owner.token)
        .send()
        .await
        .expect("Failed to fetch complaint");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn resident_cannot_delete_complaint_once_in_progress() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let owner = approved_resident(&client, &admin).await;

    let complaint_id = file_complaint(&client, &owner, "Kitchen leak").await;

    let response = client
        .put(url(&format!("/api/complaints/{}/status", complaint_id)))
        .bearer_auth(&admin.token)
        .json(&json!({ "status": "in_progress", "admin_response": "Plumber assigned" }))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(url(&format!("/api/complaints/{}", complaint_id)))
        .bearer_auth(&owner.token)
        .send()
        .await
        .expect("Failed to delete complaint");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn second_page_of_twenty_five_complaints() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    for i in 0..25 {
        file_complaint(&client, &resident, &format!("Complaint number {}", i)).await;
    }

    let response = client
        .get(url("/api/complaints?page=2&limit=10"))
        .bearer_auth(&resident.token)
        .send()
        .await
        .expect("Failed to list complaints");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["pagination"]["total_pages"], 3);
    assert_eq!(body["meta"]["total_count"], 25);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn padded_title_shorter_than_three_characters_is_rejected() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    let response = client
        .post(url("/api/complaints"))
        .bearer_auth(&resident.token)
        .json(&json!({
            "title": "   ab   ",
            "description": "Water leaking from the ceiling of the kitchen",
            "category": "plumbing",
        }))
        .send()
        .await
        .expect("Failed to create complaint");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["errors"][0]["field"], "title");
}

#[tokio::test]
#[ignore = "requires running server"]
async fn resident_status_change_is_forbidden_before_body_checks() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    let complaint_id = file_complaint(&client, &resident, "Kitchen leak").await;

    let response = client
        .put(url(&format!("/api/complaints/{}/status", complaint_id)))
        .bearer_auth(&resident.token)
        .json(&json!({ "status": "not-a-status" }))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
