//! Media API Handlers

use axum::{
    extract::{Path, Query, State},
    extract::rejection::QueryRejection,
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 签名链接参数
#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub expires: i64,
    pub sig: String,
}

/// GET /media/{*key} - 签名媒体下载
pub async fn download(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    let bytes = state.media.open(&key, query.expires, &query.sig)?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
