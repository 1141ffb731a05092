//! Data models
//!
//! Shared between store-server and clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Book/line/payment IDs are `i64` (SQLite INTEGER PRIMARY KEY); order IDs
//! are generated TEXT codes.

pub mod book;
pub mod order;
pub mod payment;

// Re-exports
pub use book::*;
pub use order::*;
pub use payment::*;
