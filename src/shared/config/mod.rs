//! Application configuration module
//!
//! Holds the settings of the session-token lifecycle. An `AuthConfig` is
//! built once at startup (see `backend::server::config`) and handed to the
//! token manager; nothing reads secrets from the environment afterwards.

use std::time::Duration;
use thiserror::Error;

/// Default lifetime of an access token.
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);

/// Default lifetime of a refresh token.
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Longest accepted lifetime for either token (ten years).
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Token signing and password hashing settings
#[derive(Clone)]
pub struct AuthConfig {
    access_secret: String,
    refresh_secret: String,
    /// Lifetime of access tokens
    pub access_ttl: Duration,
    /// Lifetime of refresh tokens
    pub refresh_ttl: Duration,
    /// bcrypt work factor used when hashing passwords
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create a new AuthConfigBuilder
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Secret used to sign access tokens
    pub fn access_secret(&self) -> &[u8] {
        self.access_secret.as_bytes()
    }

    /// Secret used to sign refresh tokens
    pub fn refresh_secret(&self) -> &[u8] {
        self.refresh_secret.as_bytes()
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Builder for AuthConfig
#[derive(Debug, Default)]
pub struct AuthConfigBuilder {
    access_secret: Option<String>,
    refresh_secret: Option<String>,
    access_ttl: Option<Duration>,
    refresh_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
}

impl AuthConfigBuilder {
    /// Set the access token secret
    pub fn access_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_secret = Some(secret.into());
        self
    }

    /// Set the refresh token secret
    pub fn refresh_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_secret = Some(secret.into());
        self
    }

    /// Set the access token lifetime
    pub fn access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = Some(ttl);
        self
    }

    /// Set the refresh token lifetime
    pub fn refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = Some(ttl);
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build the configuration
    ///
    /// Both secrets are mandatory and must differ from each other, otherwise
    /// a refresh token would verify as an access token.
    pub fn build(self) -> Result<AuthConfig, ConfigError> {
        let access_secret = self
            .access_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        let refresh_secret = self
            .refresh_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_REFRESH_SECRET"))?;

        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        let access_ttl = self.access_ttl.unwrap_or(DEFAULT_ACCESS_TTL);
        let refresh_ttl = self.refresh_ttl.unwrap_or(DEFAULT_REFRESH_TTL);
        if access_ttl.is_zero() || refresh_ttl.is_zero() {
            return Err(ConfigError::InvalidDuration("token lifetime must be positive".to_string()));
        }
        if access_ttl > MAX_TOKEN_TTL || refresh_ttl > MAX_TOKEN_TTL {
            return Err(ConfigError::InvalidDuration(
                "token lifetime must not exceed ten years".to_string(),
            ));
        }

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(AuthConfig {
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            bcrypt_cost,
        })
    }
}

/// Parse a token lifetime such as `900`, `45s`, `15m`, `12h` or `7d`.
///
/// A bare number is read as seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, ConfigError> {
    let raw = raw.trim();
    let invalid = || ConfigError::InvalidDuration(raw.to_string());

    let (digits, multiplier) = match raw.char_indices().last() {
        Some((idx, 's')) => (&raw[..idx], 1),
        Some((idx, 'm')) => (&raw[..idx], 60),
        Some((idx, 'h')) => (&raw[..idx], 60 * 60),
        Some((idx, 'd')) => (&raw[..idx], 24 * 60 * 60),
        Some(_) => (raw, 1),
        None => return Err(invalid()),
    };

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    let seconds = value.checked_mul(multiplier).ok_or_else(invalid)?;
    if seconds == 0 {
        return Err(invalid());
    }

    Ok(Duration::from_secs(seconds))
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
    #[error("access and refresh tokens must use different secrets")]
    SharedSecret,
}
