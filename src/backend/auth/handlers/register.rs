/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email, password, names and age
 * 2. Check that email and username are free
 * 3. Hash password using bcrypt
 * 4. Create user in database
 *
 * No tokens are issued here; the client logs in afterwards.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse, UserSummary};
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username, NewUser};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::validation::{require_text, validate_age, validate_email, validate_password, validate_username};

fn validate(request: &RegisterRequest) -> BackendResult<()> {
    validate_username(&request.username)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    require_text("firstName", &request.first_name)?;
    require_text("lastName", &request.last_name)?;
    validate_age(request.age)?;
    Ok(())
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body or a field fails validation
/// * `409 Conflict` - email or username already taken
/// * `500 Internal Server Error` - hashing or database failure
///
/// # Example Request
///
/// ```http
/// POST /auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "ofir",
///   "email": "ofir@example.com",
///   "password": "securepassword123",
///   "firstName": "Ofir",
///   "lastName": "Yael",
///   "age": 30
/// }
/// ```
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;
    tracing::info!("Register request for: {} ({})", request.username, request.email);

    validate(&request)?;

    let pool = &app_state.db_pool;

    if get_user_by_email(pool, &request.email).await?.is_some() {
        tracing::warn!("User already exists with email: {}", request.email);
        return Err(BackendError::conflict("Email already exists"));
    }

    if get_user_by_username(pool, &request.username).await?.is_some() {
        tracing::warn!("Username already taken: {}", request.username);
        return Err(BackendError::conflict("Username already taken"));
    }

    let password_hash = hash_password(&request.password, app_state.bcrypt_cost).await?;

    let new_user = NewUser {
        username: request.username,
        email: request.email,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        age: request.age,
        password_hash,
    };

    // A concurrent registration can still win between the checks and the insert.
    let user = create_user(pool, new_user).await.map_err(|e| {
        if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
            BackendError::conflict("Email or username already exists")
        } else {
            BackendError::from(e)
        }
    })?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}
