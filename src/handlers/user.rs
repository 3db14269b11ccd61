//! 用户相关的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{auth::LoginRequest, user::*},
    repository::UserRepository,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 注册新用户
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// 用户登录，成功时返回令牌
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_id(id).await?.ok_or(AppError::NotFound("User"))?;

    Ok(Json(UserResponse::from(user)))
}
