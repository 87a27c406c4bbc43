//! User profile API integration tests

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::{assert_error, TestApp};

#[tokio::test]
async fn test_list_and_get_hide_secrets() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    app.create_user("bob").await;

    let response = app.get("/user", Some(&alice.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.body.as_array().expect("array");
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("refreshToken").is_none());
    }

    let response = app.get(&format!("/user/{}", alice.id), Some(&alice.access_token)).await;
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["firstName"], "Test");

    let response = app.get(&format!("/user/{}", Uuid::new_v4()), Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .put(
            &format!("/user/{}", alice.id),
            Some(&alice.access_token),
            json!({ "firstName": "Alice", "age": 31 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["firstName"], "Alice");
    assert_eq!(response.body["user"]["lastName"], "User");
    assert_eq!(response.body["user"]["age"], 31);
}

#[tokio::test]
async fn test_update_rules() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let uri = format!("/user/{}", alice.id);

    let response = app.put(&uri, Some(&alice.access_token), json!({ "email": "new@example.com" })).await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app.put(&uri, Some(&alice.access_token), json!({ "age": 500 })).await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app.put(&uri, Some(&bob.access_token), json!({ "firstName": "Mallory" })).await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app.get(&uri, Some(&bob.access_token)).await;
    assert_eq!(response.body["firstName"], "Test");
    assert_eq!(response.body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_delete_only_self() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let response = app.delete(&format!("/user/{}", alice.id), Some(&bob.access_token)).await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app.delete(&format!("/user/{}", bob.id), Some(&bob.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/user", Some(&alice.access_token)).await;
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));
}
