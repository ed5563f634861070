//! Booking engine errors

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Typed rejection of a lifecycle operation.
///
/// Every variant is detected before any write; `Store` is the only
/// retryable class (the caller retries the whole operation and
/// eligibility is re-checked).
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Service request not found: {0}")]
    RequestNotFound(String),

    #[error("Already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Settlement method required for outstanding balance")]
    MethodRequired,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<RepoError> for BookingError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => BookingError::BookingNotFound(msg),
            RepoError::Duplicate(msg) => BookingError::AlreadyProcessed(msg),
            RepoError::Validation(msg) => BookingError::InvalidInput(msg),
            RepoError::Database(msg) => BookingError::Store(msg),
        }
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::Store(err.to_string())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::BookingNotFound(msg) | BookingError::RequestNotFound(msg) => {
                AppError::NotFound(msg)
            }
            BookingError::AlreadyProcessed(msg) => AppError::Conflict(msg),
            BookingError::InvalidState(msg) | BookingError::PaymentRequired(msg) => {
                AppError::BusinessRule(msg)
            }
            BookingError::MethodRequired => {
                AppError::BusinessRule("Settlement method required for outstanding balance".into())
            }
            BookingError::InvalidInput(msg) => AppError::Validation(msg),
            BookingError::Store(msg) => AppError::Database(msg),
        }
    }
}
