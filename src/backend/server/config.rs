/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by `main` first), with defaults for local development where a default is
 * safe. The JWT secrets have no default.
 *
 * | Variable                 | Default                     |
 * |--------------------------|-----------------------------|
 * | `DATABASE_URL`           | `sqlite://blog.db?mode=rwc` |
 * | `SERVER_PORT`            | `3000`                      |
 * | `JWT_SECRET`             | required                    |
 * | `JWT_REFRESH_SECRET`     | required                    |
 * | `JWT_EXPIRES_IN`         | `15m`                       |
 * | `JWT_REFRESH_EXPIRES_IN` | `7d`                        |
 * | `BCRYPT_COST`            | `12`                        |
 *
 * # Error Handling
 *
 * Unlike optional services, a bad auth configuration stops startup: the
 * server cannot issue or verify tokens without it.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::{parse_duration, AuthConfig, ConfigError};

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let mut builder = AuthConfig::builder();
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.access_secret(secret);
        }
        if let Some(secret) = lookup("JWT_REFRESH_SECRET") {
            builder = builder.refresh_secret(secret);
        }
        if let Some(raw) = lookup("JWT_EXPIRES_IN") {
            builder = builder.access_ttl(parse_duration(&raw)?);
        }
        if let Some(raw) = lookup("JWT_REFRESH_EXPIRES_IN") {
            builder = builder.refresh_ttl(parse_duration(&raw)?);
        }
        if let Some(raw) = lookup("BCRYPT_COST") {
            let cost = raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: raw,
            })?;
            builder = builder.bcrypt_cost(cost);
        }

        Ok(Self {
            database_url,
            port,
            auth: builder.build()?,
        })
    }
}

/// Open the connection pool and run migrations
///
/// Foreign keys are switched on for every connection; the cascading delete
/// relies on them being enforced at commit.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Open a private in-memory database with migrations applied
///
/// A single connection that never expires, so every query sees the same
/// database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
