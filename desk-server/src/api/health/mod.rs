//! 健康检查路由 - 公共路由 (无需认证)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(handler::health))
}
