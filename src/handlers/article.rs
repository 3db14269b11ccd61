//! 文章相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::article::*,
    repository::{ArticleRepository, UserRepository},
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

/// 把认证上下文里的用户名解析为用户 ID
async fn resolve_author(state: &AppState, auth_context: &AuthContext) -> Result<i64, AppError> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_username(&auth_context.username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(user.id)
}

/// 创建文章，作者为当前认证用户
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let author_id = resolve_author(&state, &auth_context).await?;

    let repo = ArticleRepository::new(state.db.clone());
    let article = repo.create(&req, author_id).await?;

    Ok((StatusCode::CREATED, Json(article)))
}

/// 获取文章详情
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    let article = repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Article"))?;

    Ok(Json(article))
}

/// 列出所有文章
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    let articles = repo.list().await?;

    Ok(Json(articles))
}

/// 按分类列出文章
pub async fn get_articles_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    let articles = repo.find_by_category(&category).await?;

    Ok(Json(articles))
}

/// 按标签列出文章
pub async fn get_articles_by_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    let articles = repo.find_by_tag(&tag).await?;

    Ok(Json(articles))
}

/// 更新文章
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    let article = repo
        .update(id, &req)
        .await?
        .ok_or(AppError::NotFound("Article"))?;

    Ok(Json(json!({
        "message": "更新成功",
        "article": article
    })))
}

/// 删除文章
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Article"));
    }

    Ok(Json(json!({ "message": "删除成功" })))
}

/// 点赞文章
pub async fn like_article(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    if !repo.increment_likes(id).await? {
        return Err(AppError::NotFound("Article"));
    }

    Ok(Json(json!({ "message": "点赞成功" })))
}

/// 收藏文章
pub async fn favorite_article(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ArticleRepository::new(state.db.clone());
    if !repo.increment_favorites(id).await? {
        return Err(AppError::NotFound("Article"));
    }

    Ok(Json(json!({ "message": "收藏成功" })))
}
