//! 文章数据访问

use crate::{
    error::AppError,
    models::article::{Article, CreateArticleRequest, UpdateArticleRequest},
};
use sqlx::PgPool;

pub struct ArticleRepository {
    db: PgPool,
}

impl ArticleRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建文章
    pub async fn create(
        &self,
        req: &CreateArticleRequest,
        author_id: i64,
    ) -> Result<Article, AppError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, content, author_id, category, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(author_id)
        .bind(&req.category)
        .bind(&req.tags)
        .fetch_one(&self.db)
        .await?;

        Ok(article)
    }

    /// 根据 ID 查找文章
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(article)
    }

    /// 列出所有文章，按创建时间倒序
    pub async fn list(&self) -> Result<Vec<Article>, AppError> {
        let articles =
            sqlx::query_as::<_, Article>("SELECT * FROM articles ORDER BY created_at DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(articles)
    }

    /// 按分类查找
    pub async fn find_by_category(&self, category: &str) -> Result<Vec<Article>, AppError> {
        let articles = sqlx::query_as::<_, Article>(
            "SELECT * FROM articles WHERE category = $1 ORDER BY created_at DESC",
        )
        .bind(category)
        .fetch_all(&self.db)
        .await?;

        Ok(articles)
    }

    /// 按标签查找（tags 字段子串匹配）
    pub async fn find_by_tag(&self, tag: &str) -> Result<Vec<Article>, AppError> {
        let articles = sqlx::query_as::<_, Article>(
            "SELECT * FROM articles WHERE tags LIKE '%' || $1 || '%' ORDER BY created_at DESC",
        )
        .bind(tag)
        .fetch_all(&self.db)
        .await?;

        Ok(articles)
    }

    /// 更新文章，省略的字段保持不变
    pub async fn update(
        &self,
        id: i64,
        req: &UpdateArticleRequest,
    ) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                tags = COALESCE($5, tags),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.category)
        .bind(&req.tags)
        .fetch_optional(&self.db)
        .await?;

        Ok(article)
    }

    /// 删除文章
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 点赞数原子自增
    pub async fn increment_likes(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE articles SET likes = likes + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 收藏数原子自增
    pub async fn increment_favorites(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE articles SET favorites = favorites + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
