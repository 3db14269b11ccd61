//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Authorization 头缺失或格式不正确（在任何加密校验之前）
    #[error("Missing or invalid Authorization header")]
    MissingAuthHeader,

    /// 令牌校验失败（签名错误、载荷损坏、已过期，统一对外表现）
    #[error("Invalid token")]
    InvalidToken,

    /// 用户名不存在或密码错误，对外形状一致
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// 注册时用户名已存在
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingAuthHeader
            | AppError::InvalidToken
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingAuthHeader => "Missing or invalid Authorization header".to_string(),
            AppError::InvalidToken => "Invalid token".to_string(),
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::DuplicateUsername => "Username already exists".to_string(),
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::BadRequest(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// 错误响应 DTO，形状固定为 {code, message}
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorResponse {
            code: self.code(),
            message: self.user_message(),
        };

        // 服务端日志保留完整原因，响应体不携带
        if status.is_server_error() {
            tracing::error!(code = body.code, detail = %self, "Application error");
        } else {
            tracing::debug!(code = body.code, detail = %self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
