// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;
mod postgres_comment;
mod postgres_user;

pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_comment::PostgresEditorialCommentRepository;
pub use postgres_user::PostgresUserRepository;
