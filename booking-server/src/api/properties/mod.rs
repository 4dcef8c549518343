//! Property API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/properties", post(handler::index_property))
        .route("/api/properties/{id}", get(handler::get_property))
}
