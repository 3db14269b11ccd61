//! 访问网关：按路径/方法分类请求，在受保护路径上强制令牌校验

use crate::{auth::jwt::TokenService, error::AppError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 无需令牌即可访问的路径前缀
const PUBLIC_PREFIXES: &[&str] = &["/user/login", "/user/register", "/static", "/swagger"];

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext。
// 网关是唯一的校验点，handler 不重复校验；取不到上下文说明
// 请求绕过了网关，直接拒绝。
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::MissingAuthHeader)
    }
}

/// 请求分类：GET 一律公开，登录/注册/静态资源/文档前缀公开，其余受保护
pub fn is_public(method: &Method, path: &str) -> bool {
    if method == Method::GET {
        return true;
    }
    PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// 从 Authorization 头提取 Bearer 令牌
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .ok_or(AppError::MissingAuthHeader)
}

/// 访问网关中间件
///
/// 公开请求直接放行；受保护请求提取并校验 Bearer 令牌，
/// 成功后把 AuthContext 附加到请求扩展。校验失败一律拒绝。
pub async fn auth_gate(
    State(token_service): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    // 头缺失/格式错误在任何加密校验之前就拒绝
    let token = extract_token(req.headers())?;

    let claims = token_service.verify(&token)?;

    req.extensions_mut().insert(AuthContext {
        username: claims.sub,
    });

    Ok(next.run(req).await)
}
