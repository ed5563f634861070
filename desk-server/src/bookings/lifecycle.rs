//! BookingLifecycle - front-desk state machine
//!
//! Orchestrates check-in / check-out / cancel over the repository layer.
//! Eligibility is checked first on a fresh snapshot; the persist step is a
//! conditional update guarded by the expected prior status, so two
//! concurrent transitions on the same booking cannot both succeed: the
//! loser of the race observes `AlreadyProcessed`.
//!
//! # Operation Flow
//!
//! ```text
//! operation(id, ...)
//!     ├─ 1. Load booking snapshot
//!     ├─ 2. Eligibility check (pure)
//!     ├─ 3. Early-date advisory gate (two-phase confirmation)
//!     ├─ 4. Folio aggregation + reconciliation (check-out only)
//!     ├─ 5. Conditional status write (0 rows → AlreadyProcessed)
//!     └─ 6. Return the committed snapshot
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;

use shared::models::{
    Booking, BookingStatus, CheckInRequest, CheckOutRequest, FolioView, ServiceRequest,
    ServiceRequestStatus, Settlement,
};

use crate::db::repository::{booking, service_request, settlement};

use super::charges;
use super::eligibility::{self, Clearance};
use super::error::{BookingError, BookingResult};
use super::money::to_f64;
use super::reconcile;

/// Result of a check-in call
#[derive(Debug, Clone)]
pub enum CheckInOutcome {
    /// Transition committed
    CheckedIn(Booking),
    /// Advisory only, nothing committed; resubmit with `confirm_early`
    EarlyArrival { days_early: i64 },
}

/// Result of a check-out call
#[derive(Debug, Clone)]
pub enum CheckOutOutcome {
    /// Transition and settlement committed atomically
    Settled {
        booking: Booking,
        settlement: Settlement,
    },
    /// Advisory only, nothing committed; resubmit with `confirm_early`
    EarlyDeparture { days_early: i64 },
}

/// Front-desk booking lifecycle engine
#[derive(Clone, Debug)]
pub struct BookingLifecycle {
    pool: SqlitePool,
}

impl BookingLifecycle {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_booking(&self, booking_id: &str) -> BookingResult<Booking> {
        booking::find_by_id(&self.pool, booking_id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound(format!("Booking {} not found", booking_id)))
    }

    /// Check a guest in.
    ///
    /// Before the recorded arrival date this returns an early-arrival
    /// advisory without committing; the desk resubmits with
    /// `confirm_early` after the operator confirms.
    pub async fn check_in(
        &self,
        booking_id: &str,
        req: &CheckInRequest,
        today: NaiveDate,
    ) -> BookingResult<CheckInOutcome> {
        let b = self.load_booking(booking_id).await?;

        if let Clearance::Early { days_early } = eligibility::check_in_clearance(&b, today)?
            && !req.confirm_early
        {
            return Ok(CheckInOutcome::EarlyArrival { days_early });
        }

        let rows = booking::mark_checked_in(&self.pool, booking_id, req.room_id.as_deref()).await?;
        if rows == 0 {
            // Guard failed after a passing eligibility check: lost the race
            return Err(BookingError::AlreadyProcessed(format!(
                "Booking {} was already transitioned",
                booking_id
            )));
        }

        tracing::info!(booking_id = %booking_id, room_id = ?req.room_id, "Guest checked in");
        self.load_booking(booking_id).await.map(CheckInOutcome::CheckedIn)
    }

    /// Check a guest out, settling the folio.
    ///
    /// The status flip and the settlement record commit in one
    /// transaction; every validation failure happens before it opens.
    pub async fn check_out(
        &self,
        booking_id: &str,
        req: &CheckOutRequest,
        today: NaiveDate,
    ) -> BookingResult<CheckOutOutcome> {
        let b = self.load_booking(booking_id).await?;

        if let Clearance::Early { days_early } = eligibility::check_out_clearance(&b, today)?
            && !req.confirm_early
        {
            return Ok(CheckOutOutcome::EarlyDeparture { days_early });
        }

        // Aggregate the folio
        let extra_charge = req.extra_charge.unwrap_or(0.0);
        let requests = service_request::find_by_booking(&self.pool, booking_id).await?;
        let total_owed = charges::compute_total(&b, &requests, extra_charge)?;
        let amount_paid = reconcile::prepaid_amount(&b);
        let rec = reconcile::reconcile(total_owed, amount_paid);

        if rec.requires_method && req.method.is_none() {
            return Err(BookingError::MethodRequired);
        }

        let target = if req.finalize {
            BookingStatus::Completed
        } else {
            BookingStatus::CheckedOut
        };

        let record = Settlement {
            id: shared::util::new_id(),
            booking_id: booking_id.to_string(),
            total_owed: rec.total_owed,
            amount_paid: rec.amount_paid,
            outstanding: rec.outstanding,
            // 只在实际收款时记录支付方式
            method: if rec.requires_method { req.method } else { None },
            extra_charge,
            service_charges: to_f64(charges::billable_service_charges(&requests)),
            note: req.note.clone(),
            settled_at: shared::util::now_millis(),
        };

        let mut tx = self.pool.begin().await?;
        let rows = booking::mark_checked_out(&mut *tx, booking_id, target).await?;
        if rows == 0 {
            return Err(BookingError::AlreadyProcessed(format!(
                "Booking {} was already transitioned",
                booking_id
            )));
        }
        settlement::insert(&mut *tx, &record).await?;
        tx.commit().await?;

        tracing::info!(
            booking_id = %booking_id,
            total_owed = rec.total_owed,
            outstanding = rec.outstanding,
            method = ?record.method,
            "Guest checked out"
        );

        let b = self.load_booking(booking_id).await?;
        Ok(CheckOutOutcome::Settled {
            booking: b,
            settlement: record,
        })
    }

    /// Cancel a booking (PENDING, CONFIRMED or CHECKED_IN only).
    pub async fn cancel(&self, booking_id: &str) -> BookingResult<Booking> {
        let b = self.load_booking(booking_id).await?;
        eligibility::cancel_clearance(&b)?;

        let rows = booking::mark_cancelled(&self.pool, booking_id).await?;
        if rows == 0 {
            return Err(BookingError::AlreadyProcessed(format!(
                "Booking {} was already transitioned",
                booking_id
            )));
        }

        tracing::info!(booking_id = %booking_id, "Booking cancelled");
        self.load_booking(booking_id).await
    }

    /// Move a service request to a new status.
    ///
    /// Open requests (PENDING, IN_PROGRESS) may move to IN_PROGRESS,
    /// COMPLETED or CANCELLED; terminal requests cannot be re-opened.
    pub async fn update_service_request_status(
        &self,
        request_id: &str,
        new_status: ServiceRequestStatus,
    ) -> BookingResult<ServiceRequest> {
        let request = service_request::find_by_id(&self.pool, request_id)
            .await?
            .ok_or_else(|| {
                BookingError::RequestNotFound(format!("Service request {} not found", request_id))
            })?;

        if request.status.is_terminal() {
            return Err(BookingError::AlreadyProcessed(format!(
                "Service request {} is already {:?}",
                request_id, request.status
            )));
        }
        if new_status == ServiceRequestStatus::Pending {
            return Err(BookingError::InvalidInput(
                "A service request cannot move back to PENDING".to_string(),
            ));
        }

        let rows = service_request::transition_status(&self.pool, request_id, new_status).await?;
        if rows == 0 {
            return Err(BookingError::AlreadyProcessed(format!(
                "Service request {} was already transitioned",
                request_id
            )));
        }

        service_request::find_by_id(&self.pool, request_id)
            .await?
            .ok_or_else(|| {
                BookingError::RequestNotFound(format!("Service request {} not found", request_id))
            })
    }

    /// Current folio preview for the checkout screen. Pure read.
    pub async fn folio(&self, booking_id: &str) -> BookingResult<FolioView> {
        let b = self.load_booking(booking_id).await?;
        let requests = service_request::find_by_booking(&self.pool, booking_id).await?;
        let total_owed = charges::compute_total(&b, &requests, 0.0)?;
        let amount_paid = reconcile::prepaid_amount(&b);
        let rec = reconcile::reconcile(total_owed, amount_paid);

        Ok(FolioView {
            booking_id: b.id,
            room_cost: b.total_cost,
            service_charges: to_f64(charges::billable_service_charges(&requests)),
            total_owed: rec.total_owed,
            amount_paid: rec.amount_paid,
            outstanding: rec.outstanding,
            requires_method: rec.requires_method,
        })
    }

    /// List bookings with optional status filter and guest search.
    pub async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
        search: Option<&str>,
        limit: i32,
        offset: i32,
    ) -> BookingResult<Vec<Booking>> {
        Ok(booking::find_all(&self.pool, status, search, limit, offset).await?)
    }
}
