// End-to-end checks against a running server.
//
// Needs NIVASA_API_URL (default http://127.0.0.1:5000) and an approved admin
// account in NIVASA_ADMIN_EMAIL / NIVASA_ADMIN_PASSWORD, e.g. one created with
// `nivasa-admin create`.

mod admin;
mod complaints;
mod family;
mod notices;
mod notifications;
mod registration;
mod vehicles;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

pub fn base_url() -> String {
    std::env::var("NIVASA_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

pub fn url(path: &str) -> String {
    format!("{}{}", base_url(), path)
}

pub struct Session {
    pub user_id: String,
    pub token: String,
}

pub fn resident_payload(email: &str) -> Value {
    json!({
        "name": "Test Resident",
        "email": email,
        "password": "resident123",
        "phone": "9876543210",
        "wing": "b",
        "flat_number": "402",
        "resident_type": "tenant",
    })
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@nivasa.test", prefix, Uuid::new_v4().simple())
}

pub async fn login(client: &Client, email: &str, password: &str) -> Session {
    let response = client
        .post(url("/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    Session {
        user_id: body["data"]["user"]["id"].as_str().unwrap().to_string(),
        token: body["data"]["token"].as_str().unwrap().to_string(),
    }
}

pub async fn admin_session(client: &Client) -> Session {
    let email = std::env::var("NIVASA_ADMIN_EMAIL").expect("NIVASA_ADMIN_EMAIL not set");
    let password = std::env::var("NIVASA_ADMIN_PASSWORD").expect("NIVASA_ADMIN_PASSWORD not set");
    login(client, &email, &password).await
}

/// Registers a fresh resident, approves them as admin and logs them in.
pub async fn approved_resident(client: &Client, admin: &Session) -> Session {
    let email = unique_email("resident");
    let response = client
        .post(url("/api/auth/register"))
        .json(&resident_payload(&email))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let user_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = client
        .put(url(&format!("/api/admin/users/{}/status", user_id)))
        .bearer_auth(&admin.token)
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to approve resident");
    assert_eq!(response.status(), StatusCode::OK);

    login(client, &email, "resident123").await
}
