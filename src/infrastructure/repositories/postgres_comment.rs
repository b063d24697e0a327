// src/infrastructure/repositories/postgres_comment.rs
use super::error::map_sqlx;
use crate::domain::article::ArticleId;
use crate::domain::comment::{
    CommentBody, CommentId, EditorialComment, EditorialCommentRepository, NewEditorialComment,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresEditorialCommentRepository {
    pool: PgPool,
}

impl PostgresEditorialCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    article_id: i64,
    author_id: i64,
    body: String,
    is_internal: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for EditorialComment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(EditorialComment {
            id: CommentId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            author_id: UserId::new(row.author_id)?,
            body: CommentBody::new(row.body)?,
            is_internal: row.is_internal,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl EditorialCommentRepository for PostgresEditorialCommentRepository {
    async fn insert(&self, comment: NewEditorialComment) -> DomainResult<EditorialComment> {
        let NewEditorialComment {
            article_id,
            author_id,
            body,
            is_internal,
            created_at,
        } = comment;

        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO editorial_comments (article_id, author_id, body, is_internal, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, article_id, author_id, body, is_internal, created_at",
        )
        .bind(i64::from(article_id))
        .bind(i64::from(author_id))
        .bind(body.as_str())
        .bind(is_internal)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        EditorialComment::try_from(row)
    }

    async fn list_by_article(
        &self,
        article_id: ArticleId,
        include_internal: bool,
    ) -> DomainResult<Vec<EditorialComment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, article_id, author_id, body, is_internal, created_at
             FROM editorial_comments
             WHERE article_id = $1 AND (is_internal = FALSE OR $2)
             ORDER BY created_at, id",
        )
        .bind(i64::from(article_id))
        .bind(include_internal)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(EditorialComment::try_from).collect()
    }
}
