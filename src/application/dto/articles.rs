use crate::domain::article::{Article, ArticleStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ArticleStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: i64,
    pub section_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into(),
            slug: article.slug.into(),
            body: article.body.into(),
            status: article.status,
            scheduled_at: article.scheduled_at,
            published_at: article.published_at,
            author_id: article.author_id.into(),
            section_id: article.section_id.into(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
