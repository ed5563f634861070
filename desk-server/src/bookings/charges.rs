//! Folio charge aggregation
//!
//! Computes the total owed for a booking: original booking cost, plus every
//! non-cancelled service-request charge, plus the operator-entered extra
//! charge. Side-effect free; service requests are supplied by the caller.

use rust_decimal::Decimal;
use shared::models::{Booking, ServiceRequest, ServiceRequestStatus};

use super::error::BookingError;
use super::money::{to_decimal, to_f64, validate_charge};

/// Sum of billable service-request charges (cancelled requests bill zero)
pub fn billable_service_charges(requests: &[ServiceRequest]) -> Decimal {
    requests
        .iter()
        .filter(|r| r.status != ServiceRequestStatus::Cancelled)
        .map(|r| to_decimal(r.price))
        .sum()
}

/// Total owed = booking cost + billable service charges + extra charge.
///
/// A negative or non-finite `extra_charge` fails with `InvalidInput`.
pub fn compute_total(
    booking: &Booking,
    requests: &[ServiceRequest],
    extra_charge: f64,
) -> Result<f64, BookingError> {
    validate_charge(extra_charge, "extra_charge")?;

    let total = to_decimal(booking.total_cost)
        + billable_service_charges(requests)
        + to_decimal(extra_charge);

    Ok(to_f64(total))
}
