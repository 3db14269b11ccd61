//! JWT 令牌签发与校验

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject（用户名）
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// 令牌服务
///
/// 签发和校验共用同一份密钥材料：EncodingKey 与 DecodingKey
/// 在构造时从同一个 secret 派生，两侧不可能出现变换不一致。
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_exp_secs: u64,
}

impl TokenService {
    /// 从配置创建令牌服务
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 密钥至少 32 字节
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // 过期即失效，不保留默认的 60 秒宽限
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            token_exp_secs: config.security.token_exp_secs,
        })
    }

    /// 为指定用户名签发令牌，过期时间为 now + TTL
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_exp_secs as i64);

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// 校验令牌的签名与过期时间，成功时返回 claims
    ///
    /// 所有失败原因（签名不匹配、载荷损坏、已过期）统一映射为
    /// InvalidToken，具体原因只记入 debug 日志，不向调用方泄露。
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token verification failed: {:?}", e);
                AppError::InvalidToken
            })?
            .claims)
    }

    /// 令牌有效期（秒），用于登录响应的 expires_in 字段
    pub fn expires_in(&self) -> u64 {
        self.token_exp_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig};
    use secrecy::Secret;

    fn test_config(secret: &str) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new(secret.to_string()),
                token_exp_secs: 3600,
                password_min_length: 6,
            },
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::from_config(&test_config(
            "test_secret_key_32_characters_long!",
        ))
        .unwrap();

        let token = service.issue("alice").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
        assert_eq!((claims.exp - claims.iat) as u64, service.expires_in());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config("test_secret_key_32_characters_long!");
        let service = TokenService::from_config(&config).unwrap();

        // 直接用相同密钥构造一个已过期的令牌，签名本身是有效的
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let secret = config.security.jwt_secret.expose_secret();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_just_expired_token_fails() {
        // 过期仅几秒的令牌也必须失效，不允许宽限窗口
        let config = test_config("test_secret_key_32_characters_long!");
        let service = TokenService::from_config(&config).unwrap();

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now - 300,
            exp: now - 5,
        };
        let secret = config.security.jwt_secret.expose_secret();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_tokens_fail() {
        let service = TokenService::from_config(&test_config(
            "test_secret_key_32_characters_long!",
        ))
        .unwrap();

        for bad in ["", "not-a-token", "a.b", "a.b.c"] {
            assert!(matches!(service.verify(bad), Err(AppError::InvalidToken)));
        }
    }

    #[test]
    fn test_truncated_token_fails() {
        let service = TokenService::from_config(&test_config(
            "test_secret_key_32_characters_long!",
        ))
        .unwrap();

        let token = service.issue("alice").unwrap();
        let truncated = &token[..token.len() - 5];

        assert!(matches!(
            service.verify(truncated),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_signed_with_other_key_fails() {
        let issuer = TokenService::from_config(&test_config(
            "test_secret_key_32_characters_long!",
        ))
        .unwrap();
        let verifier = TokenService::from_config(&test_config(
            "another_secret_key_32_characters_xx!",
        ))
        .unwrap();

        let token = issuer.issue("alice").unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_secret_too_short_rejected() {
        assert!(TokenService::from_config(&test_config("short")).is_err());
    }
}
