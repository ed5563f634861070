//! Money calculation utilities using rust_decimal for precision
//!
//! All folio arithmetic is done using `Decimal` internally, then converted
//! to `f64` for storage/serialization.

use crate::bookings::error::BookingError;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed single charge amount
const MAX_CHARGE: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate an operator-entered charge (finite, non-negative, within bounds)
pub fn validate_charge(value: f64, field: &str) -> Result<(), BookingError> {
    if !value.is_finite() {
        return Err(BookingError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    if value < 0.0 {
        return Err(BookingError::InvalidInput(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    if value > MAX_CHARGE {
        return Err(BookingError::InvalidInput(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field, MAX_CHARGE, value
        )));
    }
    Ok(())
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
