//! 评论数据访问

use crate::{
    error::AppError,
    models::comment::{Comment, CreateCommentRequest},
};
use sqlx::PgPool;

pub struct CommentRepository {
    db: PgPool,
}

impl CommentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建评论
    pub async fn create(
        &self,
        req: &CreateCommentRequest,
        user_id: i64,
    ) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(req.article_id)
        .bind(user_id)
        .bind(&req.content)
        .fetch_one(&self.db)
        .await?;

        Ok(comment)
    }

    /// 根据 ID 查找评论
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(comment)
    }

    /// 列出某篇文章下的评论，按创建时间倒序
    pub async fn find_by_article_id(&self, article_id: i64) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE article_id = $1 ORDER BY created_at DESC",
        )
        .bind(article_id)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    /// 更新评论内容
    pub async fn update(&self, id: i64, content: &str) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }

    /// 删除评论
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
