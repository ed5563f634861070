//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::bookings::{CheckInOutcome, CheckOutOutcome};
use crate::core::ServerState;
use crate::db::repository::{booking, service_request, settlement};
use crate::utils::time;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_cash, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Booking, BookingConfirm, BookingCreate, BookingStatus, CheckInRequest, CheckOutRequest,
    FolioView, ServiceRequest, Settlement,
};

/// Query params for listing bookings
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<BookingStatus>,
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// Non-fatal advisory attached to a transition response.
///
/// The desk must present `message` verbatim and resubmit with
/// `confirm_early` after explicit operator confirmation.
#[derive(Debug, Serialize)]
pub struct TransitionWarning {
    pub kind: &'static str,
    pub days_early: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<TransitionWarning>,
}

#[derive(Debug, Serialize)]
pub struct CheckOutResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<Settlement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<TransitionWarning>,
}

/// GET /api/bookings - 预订列表 (状态过滤 + 客人搜索)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state
        .lifecycle
        .list_bookings(
            query.status,
            query.search.as_deref(),
            query.limit,
            query.offset,
        )
        .await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let b = booking::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))?;
    Ok(Json(b))
}

/// POST /api/bookings - 创建预订 (上游预订流程入口)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    validate_required_text(&payload.guest_first_name, "guest_first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.guest_last_name, "guest_last_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.guest_email, "guest_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    validate_cash(payload.total_cost, "total_cost")?;

    let b = booking::create(state.pool(), payload).await?;
    Ok(Json(b))
}

/// POST /api/bookings/:id/confirm - 确认预订 (可同时记录线上收款)
pub async fn confirm(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BookingConfirm>,
) -> AppResult<Json<Booking>> {
    let existing = booking::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))?;

    let rows = booking::confirm(state.pool(), &id, payload.payment_captured)
        .await?;
    if rows == 0 {
        return Err(AppError::conflict(format!(
            "Booking {} is {:?}, not PENDING",
            id, existing.status
        )));
    }

    let b = booking::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))?;
    Ok(Json(b))
}

/// POST /api/bookings/:id/check-in - 前台签入
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<CheckInResponse>> {
    validate_optional_text(&payload.room_id, "room_id", MAX_NAME_LEN)?;

    let today = time::today_in(state.config.timezone);
    let outcome = state.lifecycle.check_in(&id, &payload, today).await?;

    let response = match outcome {
        CheckInOutcome::CheckedIn(b) => CheckInResponse {
            booking: Some(b),
            warning: None,
        },
        CheckInOutcome::EarlyArrival { days_early } => CheckInResponse {
            booking: None,
            warning: Some(TransitionWarning {
                kind: "EARLY_ARRIVAL",
                days_early,
                message: format!(
                    "Guest is arriving {} day(s) before the recorded check-in date; confirm to proceed",
                    days_early
                ),
            }),
        },
    };
    Ok(Json(response))
}

/// POST /api/bookings/:id/check-out - 前台签出并结算
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CheckOutRequest>,
) -> AppResult<Json<CheckOutResponse>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let today = time::today_in(state.config.timezone);
    let outcome = state.lifecycle.check_out(&id, &payload, today).await?;

    let response = match outcome {
        CheckOutOutcome::Settled {
            booking: b,
            settlement: s,
        } => CheckOutResponse {
            booking: Some(b),
            settlement: Some(s),
            warning: None,
        },
        CheckOutOutcome::EarlyDeparture { days_early } => CheckOutResponse {
            booking: None,
            settlement: None,
            warning: Some(TransitionWarning {
                kind: "EARLY_DEPARTURE",
                days_early,
                message: format!(
                    "Guest is leaving {} day(s) before the recorded check-out date; confirm to proceed",
                    days_early
                ),
            }),
        },
    };
    Ok(Json(response))
}

/// POST /api/bookings/:id/cancel - 取消预订
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let b = state.lifecycle.cancel(&id).await?;
    Ok(Json(b))
}

/// GET /api/bookings/:id/folio - 当前账单预览 (不提交任何状态)
pub async fn folio(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<FolioView>> {
    let view = state.lifecycle.folio(&id).await?;
    Ok(Json(view))
}

/// GET /api/bookings/:id/settlement - 查询结算记录
pub async fn get_settlement(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Settlement>> {
    let record = settlement::find_by_booking(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No settlement for booking {}", id)))?;
    Ok(Json(record))
}

/// GET /api/bookings/:id/service-requests - 预订的服务请求列表
pub async fn list_service_requests(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ServiceRequest>>> {
    // 404 on unknown booking rather than an empty list
    booking::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))?;

    let requests = service_request::find_by_booking(state.pool(), &id)
        .await?;
    Ok(Json(requests))
}
