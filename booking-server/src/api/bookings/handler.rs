//! Booking API Handlers

use axum::{
    Json,
    extract::{Query, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
};

use shared::models::BookingCreate;
use shared::request::BookingQuery;
use shared::response::{BookingConfirmation, BookingList};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/properties/booking - 创建预订
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<BookingCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookingConfirmation>)> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    let booking = state.bookings.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingConfirmation {
            booking_id: booking.booking_id,
            message: "Booking confirmed successfully".to_string(),
        }),
    ))
}

/// GET /api/properties/booking - 按用户/房源查询预订
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<BookingList>> {
    let bookings = state.bookings.list(query).await?;
    Ok(Json(BookingList { bookings }))
}
