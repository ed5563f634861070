//! Data models
//!
//! Shared between desk-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `String` (UUID v4, SQLite TEXT PRIMARY KEY).

pub mod booking;
pub mod service_request;
pub mod settlement;

// Re-exports
pub use booking::*;
pub use service_request::*;
pub use settlement::*;
