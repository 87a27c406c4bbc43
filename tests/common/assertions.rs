//! Assertions on API responses

use axum::http::StatusCode;

use super::database::TestResponse;

/// Assert the status and that the body is the standard error shape
pub fn assert_error(response: &TestResponse, status: StatusCode) {
    assert_eq!(response.status, status, "unexpected body: {}", response.body);
    assert_eq!(response.body["status"], status.as_u16());
    assert!(response.body["error"].is_string(), "missing error message: {}", response.body);
}
