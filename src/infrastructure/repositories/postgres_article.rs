// src/infrastructure/repositories/postgres_article.rs
use std::str::FromStr;

use super::error::map_sqlx;
use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleListCursor, ArticleListFilter, ArticleReadRepository,
    ArticleSlug, ArticleStatus, ArticleTitle, ArticleUpdate, ArticleWriteRepository, NewArticle,
    SectionId,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, slug, body, status, scheduled_at, published_at, \
     author_id, section_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    status: String,
    scheduled_at: Option<DateTime<Utc>>,
    published_at: Option<DateTime<Utc>>,
    author_id: i64,
    section_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            body: ArticleBody::new(row.body)?,
            status: ArticleStatus::from_str(&row.status)?,
            scheduled_at: row.scheduled_at,
            published_at: row.published_at,
            author_id: UserId::new(row.author_id)?,
            section_id: SectionId::new(row.section_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            body,
            author_id,
            section_id,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(
            "INSERT INTO articles (title, slug, body, status, author_id, section_id, created_at, updated_at)
             VALUES ($1, $2, $3, 'draft', $4, $5, $6, $7)
             RETURNING id, title, slug, body, status, scheduled_at, published_at, author_id, section_id, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(body.as_str())
        .bind(i64::from(author_id))
        .bind(i64::from(section_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            body,
            workflow,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            let title_str: String = title.into();
            builder.push(", title = ");
            builder.push_bind(title_str);
        }

        if let Some(slug) = slug {
            let slug_str: String = slug.into();
            builder.push(", slug = ");
            builder.push_bind(slug_str);
        }

        if let Some(body) = body {
            let body_str: String = body.into();
            builder.push(", body = ");
            builder.push_bind(body_str);
        }

        let expected_status = workflow.as_ref().map(|state| state.expected_status);
        if let Some(state) = workflow {
            builder.push(", status = ");
            builder.push_bind(state.status.as_str());
            builder.push(", scheduled_at = ");
            builder.push_bind(state.scheduled_at);
            builder.push(", published_at = ");
            builder.push_bind(state.published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        // Transitions land only on the predecessor they were computed from.
        if let Some(expected) = expected_status {
            builder.push(" AND status = ");
            builder.push_bind(expected.as_str());
        }
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        Article::try_from(row)
    }

    async fn mark_published(
        &self,
        id: ArticleId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "UPDATE articles
             SET status = 'published', published_at = $2, scheduled_at = NULL, updated_at = $2
             WHERE id = $1 AND status = 'scheduled'
             RETURNING id, title, slug, body, status, scheduled_at, published_at, author_id, section_id, created_at, updated_at",
        )
        .bind(i64::from(id))
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: ArticleListFilter,
        cursor: Option<&'a ArticleListCursor>,
    ) {
        let mut has_where = false;
        let mut prefix = |builder: &mut QueryBuilder<'a, Postgres>| {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
                has_where = true;
            }
        };

        if filter.published_only {
            prefix(builder);
            builder.push("status = 'published'");
        } else if let Some(status) = filter.status {
            prefix(builder);
            builder.push("status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(section_id) = filter.section_id {
            prefix(builder);
            builder.push("section_id = ");
            builder.push_bind(i64::from(section_id));
        }

        if let Some(cursor) = cursor {
            prefix(builder);
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(i64::from(cursor.article_id));
            builder.push(")");
        }
    }

    async fn fetch_page(
        &self,
        filter: ArticleListFilter,
        limit: u32,
        cursor: Option<&ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = i64::from(limit) + 1;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        Self::apply_conditions(&mut builder, filter, cursor);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if articles.len() > limit as usize {
            articles.pop();
            if let Some(last) = articles.last() {
                next_cursor = Some(ArticleListCursor::from_parts(last.created_at, last.id));
            }
        }

        Ok((articles, next_cursor))
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, slug, body, status, scheduled_at, published_at, author_id, section_id, created_at, updated_at
             FROM articles WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, slug, body, status, scheduled_at, published_at, author_id, section_id, created_at, updated_at
             FROM articles WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        self.fetch_page(filter, limit, cursor.as_ref()).await
    }

    async fn list_due_for_publication(&self, now: DateTime<Utc>) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, slug, body, status, scheduled_at, published_at, author_id, section_id, created_at, updated_at
             FROM articles
             WHERE status = 'scheduled' AND scheduled_at <= $1
             ORDER BY scheduled_at, id",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
