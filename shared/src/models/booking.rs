//! Booking Model (预订管理)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// Legal transitions are enforced by the desk-server lifecycle engine:
/// `Pending → Confirmed → CheckedIn → {CheckedOut, Completed}`, and
/// `{Pending, Confirmed, CheckedIn} → Cancelled`. `Completed` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Storage/wire representation (matches the serde rename)
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::CheckedIn => "CHECKED_IN",
            BookingStatus::CheckedOut => "CHECKED_OUT",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// No transition leaves a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// Online payment capture status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

/// Booking record: a guest's reservation for a stay
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: String,
    /// Guest display fields (denormalized; authoritative guest record lives upstream)
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub guest_email: String,
    /// Recorded arrival date (calendar date, business timezone)
    pub check_in_date: NaiveDate,
    /// Recorded departure date (calendar date, business timezone)
    pub check_out_date: NaiveDate,
    /// Current lifecycle status, the only authoritative state
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Pre-arrival quoted cost, set at booking creation. Never mutated here.
    pub total_cost: f64,
    /// Room assigned at check-in
    pub room_id: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    pub fn guest_name(&self) -> String {
        format!("{} {}", self.guest_first_name, self.guest_last_name)
    }
}

/// Create booking payload (entry point of the upstream booking flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub guest_email: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_cost: f64,
    pub note: Option<String>,
    /// Insert directly at CONFIRMED (channel-manager imports)
    #[serde(default)]
    pub confirmed: bool,
}

/// Confirm booking payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookingConfirm {
    /// Whether the online prepayment was captured for the full quoted cost
    #[serde(default)]
    pub payment_captured: bool,
}

/// Front-desk check-in payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckInRequest {
    /// Room to assign on arrival
    pub room_id: Option<String>,
    /// Operator confirmed an early arrival after seeing the advisory
    #[serde(default)]
    pub confirm_early: bool,
}

/// Front-desk check-out payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckOutRequest {
    /// Ad hoc charge entered by the operator (minibar, damages, ...)
    pub extra_charge: Option<f64>,
    pub note: Option<String>,
    /// Settlement method, required when an outstanding amount remains
    pub method: Option<crate::models::SettlementMethod>,
    /// Operator confirmed an early departure after seeing the advisory
    #[serde(default)]
    pub confirm_early: bool,
    /// Close the booking as COMPLETED instead of CHECKED_OUT
    #[serde(default)]
    pub finalize: bool,
}
