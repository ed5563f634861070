//! HTTP API Module
//!
//! One module per resource, each exposing a `router()`.

pub mod bookings;
pub mod health;
pub mod service_requests;

use axum::Router;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(bookings::router())
        .merge(service_requests::router())
        .merge(health::router())
}
