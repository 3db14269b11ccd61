//! 认证服务：注册、登录

use crate::{
    auth::jwt::TokenService,
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::{
        auth::{LoginRequest, LoginResponse},
        user::{RegisterRequest, User, UserResponse},
    },
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    db: PgPool,
    token_service: Arc<TokenService>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(db: PgPool, token_service: Arc<TokenService>, config: Arc<AppConfig>) -> Self {
        Self {
            db,
            token_service,
            config,
        }
    }

    /// 用户注册
    ///
    /// 先查重再插入。查重与插入之间并非原子，并发的同名注册
    /// 由 users.username 的唯一约束兜底，后到的一方得到 409。
    pub async fn register(&self, req: RegisterRequest) -> Result<UserResponse, AppError> {
        req.validate()?;
        PasswordHasher::validate_password_policy(&req.password, &self.config)?;

        let user_repo = UserRepository::new(self.db.clone());

        if user_repo.find_by_username(&req.username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let user = user_repo.create(&req.username, &password_hash).await?;

        tracing::info!(username = %user.username, user_id = user.id, "User registered");

        Ok(UserResponse::from(user))
    }

    /// 用户登录
    ///
    /// 未知用户与密码错误返回相同的 401 形状，避免探测用户名。
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user: User = user_repo
            .find_by_username(&req.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hasher = PasswordHasher::new();
        hasher.verify(&req.password, &user.password_hash)?;

        let token = self.token_service.issue(&user.username)?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(LoginResponse {
            token,
            expires_in: self.token_service.expires_in(),
            user: UserResponse::from(user),
        })
    }
}
