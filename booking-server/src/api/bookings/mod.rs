//! Booking API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/properties/booking",
        post(handler::create).get(handler::list),
    )
}
