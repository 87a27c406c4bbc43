//! Routes Module
//!
//! Route configuration for the blog API.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - Main router assembly and layers
//! └── api_routes.rs - Auth and resource route groups
//! ```

/// Main router creation
pub mod router;

/// Auth and resource routes
pub mod api_routes;

pub use router::create_router;
