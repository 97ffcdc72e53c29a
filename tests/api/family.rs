use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use super::{Session, admin_session, approved_resident, url};

async fn add_family_member(client: &Client, resident: &Session) -> String {
    let response = client
        .post(url("/api/family"))
        .bearer_auth(&resident.token)
        .json(&json!({ "name": "Asha", "relation": "child", "age": 8 }))
        .send()
        .await
        .expect("Failed to add family member");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires running server"]
async fn other_residents_family_member_is_not_found() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let owner = approved_resident(&client, &admin).await;
    let neighbour = approved_resident(&client, &admin).await;

    let member_id = add_family_member(&client, &owner).await;
    let member_url = url(&format!("/api/family/{}", member_id));

    let response = client
        .get(&member_url)
        .bearer_auth(&neighbour.token)
        .send()
        .await
        .expect("Failed to fetch family member");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .put(&member_url)
        .bearer_auth(&neighbour.token)
        .json(&json!({ "age": 9 }))
        .send()
        .await
        .expect("Failed to update family member");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(&member_url)
        .bearer_auth(&neighbour.token)
        .send()
        .await
        .expect("Failed to delete family member");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 原主人仍然能看到，且未被修改
    let response = client
        .get(&member_url)
        .bearer_auth(&owner.token)
        .send()
        .await
        .expect("Failed to fetch family member");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["age"], 8);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn whitespace_padded_name_is_rejected() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let resident = approved_resident(&client, &admin).await;

    let response = client
        .post(url("/api/family"))
        .bearer_auth(&resident.token)
        .json(&json!({ "name": "   A   ", "relation": "spouse" }))
        .send()
        .await
        .expect("Failed to add family member");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn resident_cannot_list_another_users_family() {
    let client = Client::new();
    let admin = admin_session(&client).await;
    let owner = approved_resident(&client, &admin).await;
    let neighbour = approved_resident(&client, &admin).await;

    let response = client
        .get(url(&format!("/api/family/user/{}", owner.user_id)))
        .bearer_auth(&neighbour.token)
        .send()
        .await
        .expect("Failed to list family members");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .get(url(&format!("/api/family/user/{}", owner.user_id)))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to list family members");
    assert_eq!(response.status(), StatusCode::OK);
}
