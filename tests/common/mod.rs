//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - An in-memory database and a router wired to it
//! - Authentication helpers (register, login)
//! - Assertions on the JSON error body

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
