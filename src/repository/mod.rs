//! 数据库访问层

pub mod article_repo;
pub mod comment_repo;
pub mod user_repo;

pub use article_repo::ArticleRepository;
pub use comment_repo::CommentRepository;
pub use user_repo::UserRepository;
