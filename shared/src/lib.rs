//! Shared types for the Heron front-desk system
//!
//! Domain models and payload types used by both the desk server and the
//! front-desk client. Row types are feature-gated behind `db` so the client
//! build does not pull in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
