//! 评论模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 评论
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建评论请求；评论者取自认证上下文
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub article_id: i64,

    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: String,
}

/// 更新评论请求
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: String,
}
