//! Service Request Repository

use super::{RepoError, RepoResult};
use shared::models::{ServiceRequest, ServiceRequestCreate, ServiceRequestStatus};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, booking_id, service_type, description, price, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<ServiceRequest>> {
    let request = sqlx::query_as::<_, ServiceRequest>(&format!(
        "SELECT {COLUMNS} FROM service_request WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

/// All requests for a booking, oldest first (folio line order)
pub async fn find_by_booking(
    pool: &SqlitePool,
    booking_id: &str,
) -> RepoResult<Vec<ServiceRequest>> {
    let requests = sqlx::query_as::<_, ServiceRequest>(&format!(
        "SELECT {COLUMNS} FROM service_request WHERE booking_id = ? ORDER BY created_at, id"
    ))
    .bind(booking_id)
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

pub async fn create(pool: &SqlitePool, data: ServiceRequestCreate) -> RepoResult<ServiceRequest> {
    let id = shared::util::new_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO service_request (id, booking_id, service_type, description, price, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 'PENDING', ?, ?)",
    )
    .bind(&id)
    .bind(&data.booking_id)
    .bind(data.service_type)
    .bind(&data.description)
    .bind(data.price)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service request".into()))
}

/// Move a non-terminal request to `new_status`.
///
/// Guarded on the current status still being open; returns affected rows
/// (0 = request missing or already terminal).
pub async fn transition_status(
    pool: &SqlitePool,
    id: &str,
    new_status: ServiceRequestStatus,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE service_request SET status = ?1, updated_at = ?2 \
         WHERE id = ?3 AND status IN ('PENDING', 'IN_PROGRESS')",
    )
    .bind(new_status.as_str())
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
