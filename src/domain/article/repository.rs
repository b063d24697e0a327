use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::status::ArticleStatus;
use crate::domain::article::value_objects::{ArticleId, ArticleListCursor, ArticleSlug, SectionId};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Listing filter. `published_only` is the anonymous-reader view; the
/// status/section filters refine the dashboard view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleListFilter {
    pub published_only: bool,
    pub status: Option<ArticleStatus>,
    pub section_id: Option<SectionId>,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;

    /// Atomically promote one scheduled article to published. Returns
    /// `None` when the row no longer satisfies the scheduled predicate,
    /// which makes re-running the sweep a no-op.
    async fn mark_published(
        &self,
        id: ArticleId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Article>>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    async fn list_page(
        &self,
        filter: ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)>;

    /// The sweep's selection: `status = SCHEDULED AND scheduled_at <= now`.
    async fn list_due_for_publication(&self, now: DateTime<Utc>) -> DomainResult<Vec<Article>>;
}
