//! Booking API 模块 (预订管理)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/confirm", post(handler::confirm))
        .route("/{id}/check-in", post(handler::check_in))
        .route("/{id}/check-out", post(handler::check_out))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/folio", get(handler::folio))
        .route("/{id}/settlement", get(handler::get_settlement))
        .route("/{id}/service-requests", get(handler::list_service_requests))
}
