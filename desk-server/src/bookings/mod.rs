//! Booking Lifecycle Module for Desk Server
//!
//! This module implements the front-desk booking engine:
//!
//! - **eligibility**: pure transition checks over a booking snapshot
//! - **charges**: folio aggregation (booking cost + services + extras)
//! - **reconcile**: outstanding-balance reconciliation at check-out
//! - **lifecycle**: the orchestrating state machine, persisting through
//!   status-guarded repository writes
//!
//! # Command Flow
//!
//! ```text
//! CheckIn/CheckOut/Cancel → eligibility check
//!         ├─ rejected   → typed error, nothing written
//!         ├─ early      → advisory warning, nothing written
//!         └─ cleared    → charges + reconcile (check-out only)
//!                           → conditional status write (CAS)
//!                           → settlement insert (same transaction)
//! ```

pub mod charges;
pub mod eligibility;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod reconcile;

// Re-exports
pub use error::{BookingError, BookingResult};
pub use lifecycle::{BookingLifecycle, CheckInOutcome, CheckOutOutcome};

// Re-export shared types for convenience
pub use shared::models::{
    Booking, BookingStatus, PaymentStatus, ServiceRequest, ServiceRequestStatus, Settlement,
    SettlementMethod,
};
