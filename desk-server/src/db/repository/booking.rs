//! Booking Repository
//!
//! Reads plus the status-guarded writes used by the lifecycle engine.
//! All transition updates are conditional on the expected prior status;
//! a zero affected-row count means the guard did not hold.

use super::{RepoError, RepoResult};
use shared::models::{Booking, BookingCreate, BookingStatus};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, guest_first_name, guest_last_name, guest_email, check_in_date, check_out_date, status, payment_status, total_cost, room_id, note, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM booking WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(booking)
}

/// List bookings with optional status filter and guest search.
///
/// Ordered by arrival date (newest first); restartable via limit/offset.
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<BookingStatus>,
    search: Option<&str>,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<Booking>> {
    let pattern = search.map(|s| format!("%{}%", s.trim()));
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM booking \
         WHERE (?1 IS NULL OR status = ?1) \
           AND (?2 IS NULL OR guest_first_name LIKE ?2 OR guest_last_name LIKE ?2 OR guest_email LIKE ?2) \
         ORDER BY check_in_date DESC, created_at DESC \
         LIMIT ?3 OFFSET ?4"
    ))
    .bind(status.map(|s| s.as_str()))
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

/// Insert a new booking (entry point of the upstream booking flow)
pub async fn create(pool: &SqlitePool, data: BookingCreate) -> RepoResult<Booking> {
    if data.check_out_date < data.check_in_date {
        return Err(RepoError::Validation(format!(
            "check_out_date {} is before check_in_date {}",
            data.check_out_date, data.check_in_date
        )));
    }

    let id = shared::util::new_id();
    let now = shared::util::now_millis();
    let status = if data.confirmed {
        BookingStatus::Confirmed
    } else {
        BookingStatus::Pending
    };

    sqlx::query(
        "INSERT INTO booking (id, guest_first_name, guest_last_name, guest_email, check_in_date, check_out_date, status, payment_status, total_cost, note, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 'UNPAID', ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&data.guest_first_name)
    .bind(&data.guest_last_name)
    .bind(&data.guest_email)
    .bind(data.check_in_date)
    .bind(data.check_out_date)
    .bind(status.as_str())
    .bind(data.total_cost)
    .bind(&data.note)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

/// PENDING → CONFIRMED, optionally recording the online capture.
///
/// Returns the number of affected rows (0 = booking missing or not PENDING).
pub async fn confirm(pool: &SqlitePool, id: &str, payment_captured: bool) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE booking SET status = 'CONFIRMED', \
         payment_status = CASE WHEN ?1 THEN 'PAID' ELSE payment_status END, \
         updated_at = ?2 \
         WHERE id = ?3 AND status = 'PENDING'",
    )
    .bind(payment_captured)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// CONFIRMED → CHECKED_IN, assigning a room when provided.
///
/// The guard re-checks `payment_status = 'PAID'` alongside the status.
pub async fn mark_checked_in(
    pool: &SqlitePool,
    id: &str,
    room_id: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE booking SET status = 'CHECKED_IN', \
         room_id = COALESCE(?1, room_id), updated_at = ?2 \
         WHERE id = ?3 AND status = 'CONFIRMED' AND payment_status = 'PAID'",
    )
    .bind(room_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// CHECKED_IN → CHECKED_OUT | COMPLETED, inside the check-out transaction.
pub async fn mark_checked_out(
    conn: &mut SqliteConnection,
    id: &str,
    target: BookingStatus,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE booking SET status = ?1, updated_at = ?2 \
         WHERE id = ?3 AND status = 'CHECKED_IN'",
    )
    .bind(target.as_str())
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected())
}

/// {PENDING, CONFIRMED, CHECKED_IN} → CANCELLED.
pub async fn mark_cancelled(pool: &SqlitePool, id: &str) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE booking SET status = 'CANCELLED', updated_at = ?1 \
         WHERE id = ?2 AND status IN ('PENDING', 'CONFIRMED', 'CHECKED_IN')",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
