//! Authentication test helpers
//!
//! Provides utilities for creating test users and logging them in through
//! the real endpoints.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::database::TestApp;

pub const TEST_PASSWORD: &str = "password123";

/// A registered, logged-in user
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub fn register_body(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "password": TEST_PASSWORD,
        "firstName": "Test",
        "lastName": "User",
        "age": 30
    })
}

impl TestApp {
    /// Register a user and return its id
    pub async fn register(&self, username: &str, email: &str) -> Uuid {
        let response = self.post("/auth/register", None, register_body(username, email)).await;
        assert_eq!(response.status, StatusCode::CREATED, "register failed: {}", response.body);

        response.body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("register response carries the user id")
    }

    /// Log in and return (access, refresh)
    pub async fn login(&self, email: &str) -> (String, String) {
        let response = self
            .post("/auth/login", None, json!({ "email": email, "password": TEST_PASSWORD }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        let access = response.body["accessToken"].as_str().expect("accessToken").to_string();
        let refresh = response.body["refreshToken"].as_str().expect("refreshToken").to_string();
        (access, refresh)
    }

    /// Register and log in a user named `username`
    pub async fn create_user(&self, username: &str) -> TestUser {
        let email = format!("{username}@example.com");
        let id = self.register(username, &email).await;
        let (access_token, refresh_token) = self.login(&email).await;

        TestUser {
            id,
            username: username.to_string(),
            email,
            access_token,
            refresh_token,
        }
    }
}
