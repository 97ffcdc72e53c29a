use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Session, admin_session, approved_resident, url};

async fn register_vehicle(client: &Client, resident: &Session) -> String {
    let plate = format!("MH01{}", &Uuid::new_v4().simple().to_string()[..6]);
    let response = client
        .post(url("/api/vehicles"))
        .bearer_auth(&resident.token)
        .json(&json!({
            "vehicle_type": "car",
            "registration_number": plate,
            "make": "Maruti",
            "model": "Swift",
            "color": "White",
        }))
        .send()
        .await
        .expect("Failed to register vehicle");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["status"], "pending");
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn approve(client: &Client, admin: &Session, vehicle_id: &str) -> Value {
    let response = client
        .put(url(&format!("/api/vehicles/{}/status", vehicle_id)))
        .bearer_auth(&admin.token)
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to approve vehicle");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
#[ignore = "requires running server"]
async fn approving_twice_changes_nothing() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;
    let vehicle_id = register_vehicle(&client, &resident).await;

    let first = approve(&client, &admin, &vehicle_id).await;
    let second = approve(&client, &admin, &vehicle_id).await;

    assert_eq!(first["data"]["status"], "approved");
    assert_eq!(second["data"]["status"], "approved");
    assert_eq!(first["data"]["approved_at"], second["data"]["approved_at"]);
    assert_eq!(first["data"]["approved_by"], second["data"]["approved_by"]);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn editing_an_approved_vehicle_resets_it_to_pending() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;
    let vehicle_id = register_vehicle(&client, &resident).await;
    approve(&client, &admin, &vehicle_id).await;

    let response = client
        .put(url(&format!("/api/vehicles/{}", vehicle_id)))
        .bearer_auth(&resident.token)
        .json(&json!({ "color": "Red" }))
        .send()
        .await
        .expect("Failed to update vehicle");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["color"], "Red");
    assert!(body["data"]["approved_by"].is_null());
}
