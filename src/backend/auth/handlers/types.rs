/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers. Field names are camelCase on the wire.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Register request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Chosen username (3-30 chars, starts with a letter)
    pub username: String,
    /// Email address, used to log in
    pub email: String,
    /// Plaintext password (hashed before storage)
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of logout and refresh-token requests
///
/// The token is optional here so a missing field is reported as a
/// validation error rather than a malformed body.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Token pair returned by login
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Fresh access token returned by refresh-token
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Register response
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

/// Plain acknowledgement
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Public identity fields
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
