// tests/support/mocks/repos.rs
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use docket_core::domain::article::{
    Article, ArticleId, ArticleListCursor, ArticleListFilter, ArticleReadRepository, ArticleSlug,
    ArticleStatus, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use docket_core::domain::comment::{
    CommentId, EditorialComment, EditorialCommentRepository, NewEditorialComment,
};
use docket_core::domain::errors::{DomainError, DomainResult};

/// In-memory article store driven through the same repository traits the
/// Postgres implementation fulfils, including the status-predicated
/// conditional updates.
#[derive(Default)]
pub struct InMemoryArticleRepo {
    inner: Mutex<HashMap<i64, Article>>,
    next_id: Mutex<i64>,
    /// Article ids whose promotion should fail, to exercise the sweep's
    /// per-row error isolation.
    failing_publishes: Mutex<HashSet<i64>>,
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.inner.lock().unwrap();
            let mut next = repo.next_id.lock().unwrap();
            for article in articles {
                let id = i64::from(article.id);
                *next = (*next).max(id);
                map.insert(id, article);
            }
        }
        repo
    }

    pub fn fail_publish_of(&self, id: i64) {
        self.failing_publishes.lock().unwrap().insert(id);
    }

    pub fn get(&self, id: i64) -> Option<Article> {
        self.inner.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepo {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = ArticleId::new(*next)?;
        drop(next);

        let stored = Article {
            id,
            title: article.title,
            slug: article.slug,
            body: article.body,
            status: ArticleStatus::Draft,
            scheduled_at: None,
            published_at: None,
            author_id: article.author_id,
            section_id: article.section_id,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        self.inner
            .lock()
            .unwrap()
            .insert(i64::from(id), stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut map = self.inner.lock().unwrap();
        let article = map
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        let conflict = || DomainError::Conflict("article update conflict, please retry".into());
        if article.updated_at != update.original_updated_at {
            return Err(conflict());
        }
        if let Some(state) = &update.workflow {
            if article.status != state.expected_status {
                return Err(conflict());
            }
        }

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(state) = update.workflow {
            article.status = state.status;
            article.scheduled_at = state.scheduled_at;
            article.published_at = state.published_at;
        }
        article.updated_at = update.updated_at;

        Ok(article.clone())
    }

    async fn mark_published(
        &self,
        id: ArticleId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Article>> {
        if self.failing_publishes.lock().unwrap().contains(&i64::from(id)) {
            return Err(DomainError::Persistence("induced failure".into()));
        }

        let mut map = self.inner.lock().unwrap();
        let Some(article) = map.get_mut(&i64::from(id)) else {
            return Ok(None);
        };
        if article.status != ArticleStatus::Scheduled {
            return Ok(None);
        }

        article.status = ArticleStatus::Published;
        article.published_at = Some(now);
        article.scheduled_at = None;
        article.updated_at = now;
        Ok(Some(article.clone()))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepo {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.inner.lock().unwrap().get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .values()
            .find(|article| article.slug.as_str() == slug.as_str())
            .cloned())
    }

    async fn list_page(
        &self,
        filter: ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        let map = self.inner.lock().unwrap();
        let mut articles: Vec<Article> = map
            .values()
            .filter(|article| {
                if filter.published_only {
                    return article.status == ArticleStatus::Published;
                }
                filter.status.is_none_or(|status| article.status == status)
            })
            .filter(|article| {
                filter
                    .section_id
                    .is_none_or(|section| article.section_id == section)
            })
            .filter(|article| {
                cursor.is_none_or(|cursor| {
                    (article.created_at, i64::from(article.id))
                        < (cursor.created_at, i64::from(cursor.article_id))
                })
            })
            .cloned()
            .collect();

        articles.sort_by(|a, b| {
            (b.created_at, i64::from(b.id)).cmp(&(a.created_at, i64::from(a.id)))
        });

        let limit = limit.clamp(1, 100) as usize;
        let next_cursor = if articles.len() > limit {
            articles.truncate(limit);
            articles
                .last()
                .map(|last| ArticleListCursor::from_parts(last.created_at, last.id))
        } else {
            None
        };

        Ok((articles, next_cursor))
    }

    async fn list_due_for_publication(&self, now: DateTime<Utc>) -> DomainResult<Vec<Article>> {
        let map = self.inner.lock().unwrap();
        let mut due: Vec<Article> = map
            .values()
            .filter(|article| {
                article.status == ArticleStatus::Scheduled
                    && article.scheduled_at.is_some_and(|at| at <= now)
            })
            .cloned()
            .collect();
        due.sort_by_key(|article| (article.scheduled_at, i64::from(article.id)));
        Ok(due)
    }
}

/* -------------------------------- EditorialCommentRepository -------------------------------- */

#[derive(Default)]
pub struct InMemoryCommentRepo {
    inner: Mutex<Vec<EditorialComment>>,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EditorialCommentRepository for InMemoryCommentRepo {
    async fn insert(&self, comment: NewEditorialComment) -> DomainResult<EditorialComment> {
        let mut list = self.inner.lock().unwrap();
        let stored = EditorialComment {
            id: CommentId::new(list.len() as i64 + 1)?,
            article_id: comment.article_id,
            author_id: comment.author_id,
            body: comment.body,
            is_internal: comment.is_internal,
            created_at: comment.created_at,
        };
        list.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_article(
        &self,
        article_id: docket_core::domain::article::ArticleId,
        include_internal: bool,
    ) -> DomainResult<Vec<EditorialComment>> {
        let list = self.inner.lock().unwrap();
        Ok(list
            .iter()
            .filter(|comment| comment.article_id == article_id)
            .filter(|comment| include_internal || !comment.is_internal)
            .cloned()
            .collect())
    }
}
