//! 错误模型单元测试

use axum::http::StatusCode;
use blog_service::error::{AppError, ErrorResponse};

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::MissingAuthHeader.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::DuplicateUsername.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::NotFound("Article").status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        AppError::BadRequest("invalid".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Validation("error".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_database_error_status_code() {
    let app_error = AppError::Database(sqlx::Error::RowNotFound);
    assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_user_messages_no_sensitive_info() {
    let db_error = AppError::Database(sqlx::Error::RowNotFound);
    let message = db_error.user_message();
    assert_eq!(message, "Database error occurred");
    assert!(!message.to_lowercase().contains("sqlx"));
    assert!(!message.to_lowercase().contains("row"));

    let config_error = AppError::Config("Missing secret".to_string());
    assert_eq!(config_error.user_message(), "Configuration error");
}

#[test]
fn test_credential_errors_share_shape() {
    // 未知用户与密码错误对外不可区分
    assert_eq!(
        AppError::InvalidCredentials.user_message(),
        "Invalid username or password"
    );
    assert_eq!(AppError::InvalidCredentials.code(), 401);
}

#[test]
fn test_error_response_shape() {
    let body = ErrorResponse {
        code: 401,
        message: "Invalid token".to_string(),
    };

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["code"], 401);
    assert_eq!(json["message"], "Invalid token");
    assert_eq!(json.as_object().unwrap().len(), 2);
}
