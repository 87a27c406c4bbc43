//! Authentication Handlers
//!
//! HTTP handlers for the `/auth` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request/response types
//! ├── register.rs - POST /auth/register
//! ├── login.rs    - POST /auth/login
//! ├── logout.rs   - POST /auth/logout (bearer required)
//! └── refresh.rs  - POST /auth/refresh-token
//! ```

/// Request and response types
pub mod types;

pub mod register;
pub mod login;
pub mod logout;
pub mod refresh;

pub use register::register;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh_token;
