//! 认证模块：令牌签发校验、密码哈希、访问网关

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenService};
pub use middleware::{auth_gate, extract_token, is_public, AuthContext};
pub use password::PasswordHasher;
