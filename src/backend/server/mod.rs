//! Server Module
//!
//! This module contains the code for initializing and configuring the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration and database connection
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the SQLite pool and the token manager. Both are cheap to
//! clone and neither holds mutable in-process state.
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Database**: connect and run migrations
//! 3. **Router Creation**: routes, auth middleware, tracing layer
//!
//! # Example
//!
//! ```rust,no_run
//! use blog_api::backend::server::{build_app, config::ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = build_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{build_app, create_app};
pub use state::AppState;
