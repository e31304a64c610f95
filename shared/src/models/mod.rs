//! Data models
//!
//! Shared between gym-server and its clients (via API).
//! Member IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).

pub mod member;
pub mod plan;
pub mod reminder;

// Re-exports
pub use member::*;
pub use plan::*;
pub use reminder::*;
