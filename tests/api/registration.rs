use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{resident_payload, unique_email, url};

#[tokio::test]
#[ignore = "requires running server"]
async fn duplicate_email_is_rejected() {
    let client = Client::new();
    let email = unique_email("dup");

    let first = client
        .post(url("/api/auth/register"))
        .json(&resident_payload(&email))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(first.status(), StatusCode::CREATED);

    // 大小写不同也算重复
    let second = client
        .post(url("/api/auth/register"))
        .json(&resident_payload(&email.to_uppercase()))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn pending_resident_cannot_log_in() {
    let client = Client::new();
    let email = unique_email("pending");

    client
        .post(url("/api/auth/register"))
        .json(&resident_payload(&email))
        .send()
        .await
        .expect("Failed to register");

    let response = client
        .post(url("/api/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": "resident123" }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
