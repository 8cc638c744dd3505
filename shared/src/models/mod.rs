//! Data models
//!
//! Shared between hr-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod account;
pub mod assignment;
pub mod auth;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod project;
pub mod role;
pub mod validate;

// Re-exports
pub use account::*;
pub use assignment::*;
pub use auth::*;
pub use dashboard::*;
pub use department::*;
pub use employee::*;
pub use project::*;
pub use role::*;
