//! 统一错误处理
//!
//! 封闭的应用错误枚举；所有处理器边界统一转换为
//! `{"error": "..."}` 响应体。上游(存储/索引)错误信息原样透出，
//! 其余 5xx 仅记录日志。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Property not found"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use shared::response::ErrorResponse;

/// 应用错误枚举
///
/// # 错误分类
///
/// | 分类 | 状态码 |
/// |------|--------|
/// | 请求错误 | 400 / 404 / 405 / 409 |
/// | 签名链接错误 | 403 / 410 |
/// | 上游与系统错误 | 500 / 503 / 504 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 请求错误 (4xx) ==========
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Method not allowed")]
    /// 方法不允许 (405)
    MethodNotAllowed,

    #[error("Conflict: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    // ========== 签名链接错误 (4xx) ==========
    #[error("Invalid signature")]
    /// 签名无效 (403)
    Forbidden,

    #[error("Link expired")]
    /// 签名链接过期 (410)
    Expired,

    // ========== 上游与系统错误 (5xx) ==========
    #[error("Upstream error: {0}")]
    /// 存储/索引故障 (500)，错误信息透出
    Upstream(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),

    #[error("Service unavailable: {0}")]
    /// 重试耗尽 (503)
    Unavailable(String),

    #[error("Request timed out")]
    /// 请求超时 (504)
    Timeout,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),

            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::Expired => (StatusCode::GONE, self.to_string()),

            AppError::Upstream(msg) => {
                error!(target: "upstream", error = %msg, "Upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Unavailable(msg) => {
                error!(target: "upstream", error = %msg, "Retries exhausted");
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
