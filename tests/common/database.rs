//! Test application fixture
//!
//! Every `TestApp` owns a private in-memory SQLite database with migrations
//! applied, so tests never share state.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use blog_api::backend::server::config::connect_in_memory;
use blog_api::backend::server::{create_app, AppState};
use blog_api::shared::AuthConfig;

/// Router plus direct access to its database
pub struct TestApp {
    pub pool: SqlitePool,
    pub router: Router,
}

/// Status and parsed JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig::builder()
        .access_secret("test-access-secret")
        .refresh_secret("test-refresh-secret")
        .bcrypt_cost(4)
        .build()
        .expect("valid test auth config")
}

impl TestApp {
    /// Create a new app over a fresh database
    pub async fn new() -> Self {
        let pool = connect_in_memory().await.expect("Failed to open test database");
        let state = AppState::new(pool.clone(), &test_auth_config());
        Self {
            pool,
            router: create_app(state),
        }
    }

    /// Send one request through the router
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Count rows of `table` matching `column = id`
    pub async fn count_where(&self, table: &str, column: &str, id: uuid::Uuid) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE {column} = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }
}
