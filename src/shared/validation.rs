//! Request field validation
//!
//! Small predicates used by the registration, post and comment handlers.

use crate::shared::error::SharedError;

/// Oldest age the user profile accepts
pub const MAX_AGE: i64 = 120;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_username(username: &str) -> Result<(), SharedError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        Err(SharedError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ))
    }
}

/// Basic shape check, the address is never mailed.
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(SharedError::validation("email", "Invalid email format")),
    }
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    Ok(())
}

pub fn validate_age(age: i64) -> Result<(), SharedError> {
    if (0..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(SharedError::validation("age", "Please enter a valid age."))
    }
}

/// Reject missing or whitespace-only text fields
pub fn require_text(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, format!("{field} is required")));
    }
    Ok(())
}
