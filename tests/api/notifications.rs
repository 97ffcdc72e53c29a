use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Session, admin_session, approved_resident, url};

async fn send_to(client: &Client, admin: &Session, recipient: &Session, title: &str) -> String {
    let response = client
        .post(url("/api/notifications/send"))
        .bearer_auth(&admin.token)
        .json(&json!({
            "user_id": recipient.user_id,
            "title": title,
            "message": "Water supply will be off from 10am to 1pm",
        }))
        .send()
        .await
        .expect("Failed to send notification");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn approved_resident_count(client: &Client, admin: &Session) -> u64 {
    let response = client
        .get(url("/api/admin/dashboard"))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to fetch dashboard");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"]["residents"]["approved"].as_u64().unwrap()
}

async fn inbox_titles(client: &Client, resident: &Session) -> Vec<String> {
    let response = client
        .get(url("/api/notifications?limit=100"))
        .bearer_auth(&resident.token)
        .send()
        .await
        .expect("Failed to list notifications");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
#[ignore = "requires running server"]
async fn cannot_read_or_delete_someone_elses_notification() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let owner = approved_resident(&client, &admin).await;
    let neighbour = approved_resident(&client, &admin).await;

    let notification_id = send_to(&client, &admin, &owner, "Water cut tomorrow").await;

    let response = client
        .put(url(&format!("/api/notifications/{}/read", notification_id)))
        .bearer_auth(&neighbour.token)
        .send()
        .await
        .expect("Failed to mark notification read");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(url(&format!("/api/notifications/{}", notification_id)))
        .bearer_auth(&neighbour.token)
        .send()
        .await
        .expect("Failed to delete notification");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .put(url(&format!("/api/notifications/{}/read", notification_id)))
        .bearer_auth(&owner.token)
        .send()
        .await
        .expect("Failed to mark notification read");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["is_read"], true);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn broadcast_reaches_every_approved_resident() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    let title = format!("Society meeting {}", Uuid::new_v4().simple());
    let before = approved_resident_count(&client, &admin).await;

    let response = client
        .post(url("/api/notifications/broadcast"))
        .bearer_auth(&admin.token)
        .json(&json!({
            "title": title,
            "message": "Annual general meeting in the clubhouse on Sunday",
        }))
        .send()
        .await
        .expect("Failed to broadcast");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let recipients = body["data"]["recipients"].as_u64().unwrap();

    // 其他测试可能同时批准住户，所以给出区间
    let after = approved_resident_count(&client, &admin).await;
    assert!(
        (before..=after).contains(&recipients),
        "{} not in {}..={}",
        recipients,
        before,
        after
    );

    assert!(inbox_titles(&client, &resident).await.contains(&title));
}

#[tokio::test]
#[ignore = "requires running server"]
async fn resident_is_forbidden_before_the_body_is_validated() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    let response = client
        .post(url("/api/notifications/send"))
        .bearer_auth(&resident.token)
        .json(&json!({ "title": "" }))
        .send()
        .await
        .expect("Failed to send notification");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .post(url("/api/notifications/broadcast"))
        .bearer_auth(&resident.token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to broadcast");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn blank_broadcast_title_is_rejected() {
    let client = Client::new();
    let admin = admin_session(&client).await;

    let response = client
        .post(url("/api/notifications/broadcast"))
        .bearer_auth(&admin.token)
        .json(&json!({ "title": "   ", "message": "Lift maintenance at noon" }))
        .send()
        .await
        .expect("Failed to broadcast");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
