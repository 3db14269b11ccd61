//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{auth, handlers, middleware::AppState};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 创建应用路由
///
/// 访问网关作为整站中间件应用：公开/受保护的判定在网关内完成，
/// 路由表本身不区分，读路由与认证路由天然放行。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // 健康检查与指标
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export))
        // 用户
        .route("/user/register", post(handlers::user::register))
        .route("/user/login", post(handlers::user::login))
        .route("/users/{id}", get(handlers::user::get_user))
        // 文章
        .route(
            "/articles",
            get(handlers::article::list_articles).post(handlers::article::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::article::get_article)
                .put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        )
        .route(
            "/articles/category/{category}",
            get(handlers::article::get_articles_by_category),
        )
        .route(
            "/articles/tag/{tag}",
            get(handlers::article::get_articles_by_tag),
        )
        .route("/articles/{id}/like", post(handlers::article::like_article))
        .route(
            "/articles/{id}/favorite",
            post(handlers::article::favorite_article),
        )
        // 评论
        .route("/comments", post(handlers::comment::create_comment))
        .route(
            "/comments/{id}",
            get(handlers::comment::get_comment)
                .put(handlers::comment::update_comment)
                .delete(handlers::comment::delete_comment),
        )
        .route(
            "/comments/article/{article_id}",
            get(handlers::comment::get_comments_by_article),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.token_service.clone(),
            auth::middleware::auth_gate,
        ))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
