//! Posts Module
//!
//! Blog posts and the cascading delete that removes a post together with its
//! comments.
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs      - Module exports
//! ├── db.rs       - Post model and queries
//! ├── cascade.rs  - Transactional post + comments delete
//! └── handlers.rs - /post HTTP handlers
//! ```

pub mod db;
pub mod cascade;
pub mod handlers;

pub use cascade::{delete_post_cascade, CascadeReport};
pub use db::Post;
