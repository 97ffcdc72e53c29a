use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{admin_session, approved_resident, url};

#[tokio::test]
#[ignore = "requires running server"]
async fn admin_cannot_delete_own_account() {
    let client = Client::new();
    let admin = admin_session(&client).await;

    let response = client
        .delete(url(&format!("/api/admin/users/{}", admin.user_id)))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "You cannot delete your own account");

    // 账号仍然可用
    let response = client
        .get(url("/api/auth/me"))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to fetch profile");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn resident_cannot_reach_admin_routes() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    let response = client
        .delete(url(&format!("/api/admin/users/{}", admin.user_id)))
        .bearer_auth(&resident.token)
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .get(url("/api/admin/dashboard"))
        .bearer_auth(&resident.token)
        .send()
        .await
        .expect("Failed to fetch dashboard");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
