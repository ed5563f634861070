//! Service Request API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{booking, service_request};
use crate::utils::validation::{MAX_NOTE_LEN, validate_cash, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{ServiceRequest, ServiceRequestCreate, ServiceRequestStatusUpdate};

/// POST /api/service-requests - 创建服务请求
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceRequestCreate>,
) -> AppResult<Json<ServiceRequest>> {
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_cash(payload.price, "price")?;

    // Requests attach to an open booking only
    let b = booking::find_by_id(state.pool(), &payload.booking_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Booking {} not found", payload.booking_id))
        })?;
    if b.status.is_terminal() {
        return Err(AppError::business_rule(format!(
            "Cannot add a service request to booking {} in {:?} status",
            b.id, b.status
        )));
    }

    let request = service_request::create(state.pool(), payload).await?;
    Ok(Json(request))
}

/// GET /api/service-requests/:id - 获取单个服务请求
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ServiceRequest>> {
    let request = service_request::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service request {} not found", id)))?;
    Ok(Json(request))
}

/// PUT /api/service-requests/:id/status - 更新服务请求状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ServiceRequestStatusUpdate>,
) -> AppResult<Json<ServiceRequest>> {
    let request = state
        .lifecycle
        .update_service_request_status(&id, payload.status)
        .await?;
    Ok(Json(request))
}
