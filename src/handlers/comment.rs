//! 评论相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::comment::*,
    repository::{ArticleRepository, CommentRepository, UserRepository},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 创建评论，评论者为当前认证用户
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo
        .find_by_username(&auth_context.username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    // 评论必须挂在存在的文章上
    let article_repo = ArticleRepository::new(state.db.clone());
    article_repo
        .find_by_id(req.article_id)
        .await?
        .ok_or(AppError::NotFound("Article"))?;

    let repo = CommentRepository::new(state.db.clone());
    let comment = repo.create(&req, user.id).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// 获取评论详情
pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    let comment = repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Comment"))?;

    Ok(Json(comment))
}

/// 列出某篇文章下的评论
pub async fn get_comments_by_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    let comments = repo.find_by_article_id(article_id).await?;

    Ok(Json(comments))
}

/// 更新评论
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = CommentRepository::new(state.db.clone());
    let comment = repo
        .update(id, &req.content)
        .await?
        .ok_or(AppError::NotFound("Comment"))?;

    Ok(Json(json!({
        "message": "更新成功",
        "comment": comment
    })))
}

/// 删除评论
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Comment"));
    }

    Ok(Json(json!({ "message": "删除成功" })))
}
