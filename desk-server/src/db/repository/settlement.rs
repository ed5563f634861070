//! Settlement Repository
//!
//! Settlements are write-once; the insert runs inside the check-out
//! transaction alongside the booking status flip.

use super::{RepoError, RepoResult};
use shared::models::Settlement;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, booking_id, total_owed, amount_paid, outstanding, method, extra_charge, service_charges, note, settled_at";

pub async fn insert(conn: &mut SqliteConnection, settlement: &Settlement) -> RepoResult<()> {
    let result = sqlx::query(
        "INSERT INTO settlement (id, booking_id, total_owed, amount_paid, outstanding, method, extra_charge, service_charges, note, settled_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&settlement.id)
    .bind(&settlement.booking_id)
    .bind(settlement.total_owed)
    .bind(settlement.amount_paid)
    .bind(settlement.outstanding)
    .bind(settlement.method)
    .bind(settlement.extra_charge)
    .bind(settlement.service_charges)
    .bind(&settlement.note)
    .bind(settlement.settled_at)
    .execute(conn)
    .await;

    match result {
        Ok(_) => Ok(()),
        // UNIQUE(booking_id): a settlement already exists for this booking
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(RepoError::Duplicate(
            format!("Settlement already exists for booking {}", settlement.booking_id),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_booking(
    pool: &SqlitePool,
    booking_id: &str,
) -> RepoResult<Option<Settlement>> {
    let settlement = sqlx::query_as::<_, Settlement>(&format!(
        "SELECT {COLUMNS} FROM settlement WHERE booking_id = ?"
    ))
    .bind(booking_id)
    .fetch_optional(pool)
    .await?;
    Ok(settlement)
}
