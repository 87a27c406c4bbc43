//! Comments Module
//!
//! Comments belong to exactly one post and appear in the post's ordered
//! comment list.
//!
//! # Module Structure
//!
//! ```text
//! comments/
//! ├── mod.rs      - Module exports
//! ├── db.rs       - Comment model and transactional writes
//! └── handlers.rs - /comment/{postId}/comment HTTP handlers
//! ```

pub mod db;
pub mod handlers;

pub use db::Comment;
