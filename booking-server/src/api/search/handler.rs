//! Search API Handlers

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use shared::request::SearchRequest;
use shared::response::SearchResponse;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/properties/search - 搜索房源
pub async fn search(
    State(state): State<ServerState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    let response = state.search.search(&request, &state.media).await?;
    Ok(Json(response))
}
