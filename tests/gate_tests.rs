//! 访问网关集成测试
//!
//! 这些测试只经过网关的分类与拒绝路径，使用惰性连接池，
//! 不需要真实数据库。

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use blog_service::auth::{auth_gate, jwt::TokenService, AuthContext};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{create_lazy_pool, create_test_app_state, create_test_config};

fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::from_config(&create_test_config()).unwrap())
}

/// 返回当前认证用户名的测试 handler
async fn whoami(auth_context: AuthContext) -> String {
    auth_context.username
}

/// 带网关的最小路由，避免依赖数据库的 handler
fn gated_test_router(token_service: Arc<TokenService>) -> Router {
    Router::new()
        .route("/whoami", post(whoami))
        .route("/public", get(|| async { "open" }))
        .layer(from_fn_with_state(token_service, auth_gate))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_passes_without_header() {
    let app = gated_test_router(test_token_service());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/public")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_post_without_header_rejected() {
    let app = gated_test_router(test_token_service());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/whoami")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], 401);
    assert_eq!(json["message"], "Missing or invalid Authorization header");
}

#[tokio::test]
async fn test_post_with_malformed_header_rejected() {
    let app = gated_test_router(test_token_service());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/whoami")
                .header(header::AUTHORIZATION, "Token abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Missing or invalid Authorization header");
}

#[tokio::test]
async fn test_post_with_invalid_token_rejected() {
    let app = gated_test_router(test_token_service());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/whoami")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], 401);
    assert_eq!(json["message"], "Invalid token");
}

#[tokio::test]
async fn test_post_with_valid_token_reaches_handler() {
    let token_service = test_token_service();
    let token = token_service.issue("alice").unwrap();
    let app = gated_test_router(token_service);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/whoami")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"alice");
}

#[tokio::test]
async fn test_full_router_post_articles_without_header_rejected() {
    // 完整路由 + 惰性连接池：请求在网关处被拒，不会触达数据库
    let config = create_test_config();
    let state = create_test_app_state(create_lazy_pool(&config));
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/articles")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"t","content":"c"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], 401);
    assert_eq!(json["message"], "Missing or invalid Authorization header");
}

#[tokio::test]
async fn test_full_router_health_is_public() {
    let config = create_test_config();
    let state = create_test_app_state(create_lazy_pool(&config));
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_full_router_delete_requires_token() {
    let config = create_test_config();
    let state = create_test_app_state(create_lazy_pool(&config));
    let app = blog_service::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/comments/1")
                .header(header::AUTHORIZATION, "Bearer invalid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid token");
}
