//! Settlement reconciliation
//!
//! Compares total owed against the amount already captured and reports the
//! outstanding balance. The reconciler is agnostic to how "already paid"
//! was derived; that policy lives in [`prepaid_amount`], owned by the
//! lifecycle.

use rust_decimal::Decimal;
use shared::models::{Booking, PaymentStatus};

use super::money::{to_decimal, to_f64};

/// Outcome of comparing total owed against the captured amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciliation {
    pub total_owed: f64,
    pub amount_paid: f64,
    /// max(total_owed - amount_paid, 0), never negative
    pub outstanding: f64,
    /// A settlement method must be chosen before committing check-out
    pub requires_method: bool,
}

/// Reconcile total owed against the amount already captured.
pub fn reconcile(total_owed: f64, already_paid: f64) -> Reconciliation {
    let outstanding = (to_decimal(total_owed) - to_decimal(already_paid)).max(Decimal::ZERO);
    let outstanding = to_f64(outstanding);
    Reconciliation {
        total_owed,
        amount_paid: already_paid,
        outstanding,
        requires_method: outstanding > 0.0,
    }
}

/// Amount captured online before arrival.
///
/// Policy: `PAID` means the full quoted booking cost was captured;
/// anything else means nothing was. Defined once so the rule is not
/// re-derived inline wherever settlement is shown.
pub fn prepaid_amount(booking: &Booking) -> f64 {
    match booking.payment_status {
        PaymentStatus::Paid => booking.total_cost,
        PaymentStatus::Unpaid | PaymentStatus::Refunded => 0.0,
    }
}
