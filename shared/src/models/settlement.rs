//! Settlement Model (结算)
//!
//! One immutable settlement record per completed check-out.

use serde::{Deserialize, Serialize};

/// How an outstanding balance was collected at the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementMethod {
    Cash,
    Card,
}

impl SettlementMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementMethod::Cash => "CASH",
            SettlementMethod::Card => "CARD",
        }
    }
}

/// Final reconciliation of total owed vs. amount already captured
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Settlement {
    pub id: String,
    pub booking_id: String,
    /// booking cost + billable service charges + extra charge
    pub total_owed: f64,
    /// Amount already captured online before arrival
    pub amount_paid: f64,
    /// max(total_owed - amount_paid, 0), never negative
    pub outstanding: f64,
    /// Present only when an outstanding amount was collected
    pub method: Option<SettlementMethod>,
    pub extra_charge: f64,
    pub service_charges: f64,
    pub note: Option<String>,
    pub settled_at: i64,
}

/// Current folio preview for the checkout screen (nothing committed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioView {
    pub booking_id: String,
    pub room_cost: f64,
    pub service_charges: f64,
    pub total_owed: f64,
    pub amount_paid: f64,
    pub outstanding: f64,
    pub requires_method: bool,
}
