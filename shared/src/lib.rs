//! Shared types for the bookstore order service
//!
//! Common types used across crates including error types,
//! response structures, domain models, and utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
