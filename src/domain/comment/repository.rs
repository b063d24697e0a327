use crate::domain::article::ArticleId;
use crate::domain::comment::entity::{EditorialComment, NewEditorialComment};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait EditorialCommentRepository: Send + Sync {
    async fn insert(&self, comment: NewEditorialComment) -> DomainResult<EditorialComment>;

    /// Comments for one article, oldest first. Internal notes are filtered
    /// out unless the caller may see them.
    async fn list_by_article(
        &self,
        article_id: ArticleId,
        include_internal: bool,
    ) -> DomainResult<Vec<EditorialComment>>;
}
