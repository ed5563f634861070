//! Transition eligibility checks
//!
//! Pure classification over an immutable booking snapshot and the current
//! business date. No side effects; rules evaluate in order and the first
//! failure wins. Early arrival/departure is not a failure: the operation
//! is permitted but needs explicit operator confirmation.

use chrono::NaiveDate;
use shared::models::{Booking, BookingStatus, PaymentStatus};

use super::error::BookingError;

/// Result of a passing eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// Proceed without confirmation
    Clear,
    /// Permitted, but the recorded date is in the future; the desk must
    /// confirm before the transition is committed
    Early { days_early: i64 },
}

/// Check-in eligibility.
///
/// 1. `CHECKED_IN` → already processed
/// 2. anything other than `CONFIRMED` → invalid state
/// 3. not paid → payment required
/// 4. before the recorded arrival date → early-arrival advisory
pub fn check_in_clearance(booking: &Booking, today: NaiveDate) -> Result<Clearance, BookingError> {
    match booking.status {
        BookingStatus::CheckedIn => {
            return Err(BookingError::AlreadyProcessed(format!(
                "Booking {} is already checked in",
                booking.id
            )));
        }
        BookingStatus::Confirmed => {}
        status => {
            return Err(BookingError::InvalidState(format!(
                "Cannot check in booking {} in {:?} status",
                booking.id, status
            )));
        }
    }

    if booking.payment_status != PaymentStatus::Paid {
        return Err(BookingError::PaymentRequired(format!(
            "Booking {} is {:?}; payment must be captured before check-in",
            booking.id, booking.payment_status
        )));
    }

    if today < booking.check_in_date {
        let days_early = (booking.check_in_date - today).num_days();
        return Ok(Clearance::Early { days_early });
    }

    Ok(Clearance::Clear)
}

/// Check-out eligibility (symmetric to check-in).
///
/// 1. `CHECKED_OUT`/`COMPLETED` → already processed
/// 2. anything other than `CHECKED_IN` → invalid state
/// 3. before the recorded departure date → early-departure advisory
pub fn check_out_clearance(booking: &Booking, today: NaiveDate) -> Result<Clearance, BookingError> {
    match booking.status {
        BookingStatus::CheckedOut | BookingStatus::Completed => {
            return Err(BookingError::AlreadyProcessed(format!(
                "Booking {} is already checked out",
                booking.id
            )));
        }
        BookingStatus::CheckedIn => {}
        status => {
            return Err(BookingError::InvalidState(format!(
                "Cannot check out booking {} in {:?} status; guest must be checked in",
                booking.id, status
            )));
        }
    }

    if today < booking.check_out_date {
        let days_early = (booking.check_out_date - today).num_days();
        return Ok(Clearance::Early { days_early });
    }

    Ok(Clearance::Clear)
}

/// Cancellation eligibility: only PENDING, CONFIRMED or CHECKED_IN may cancel.
pub fn cancel_clearance(booking: &Booking) -> Result<(), BookingError> {
    match booking.status {
        BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn => Ok(()),
        status => Err(BookingError::InvalidState(format!(
            "Cannot cancel booking {} in {:?} status",
            booking.id, status
        ))),
    }
}
