//! Users Module
//!
//! Profile endpoints under `/user`. The user record itself and its queries
//! live in `auth::users`, next to the refresh-token column they share.

pub mod handlers;

pub use handlers::UserProfile;
