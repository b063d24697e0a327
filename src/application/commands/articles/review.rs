// src/application/commands/articles/review.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleEvent, ArticleId, ArticleUpdate},
};

/// Sends an IN_REVIEW article back to its author for changes.
pub struct RequestRevisionsCommand {
    pub id: i64,
}

/// Clears an IN_REVIEW article for publication or scheduling.
pub struct ApproveArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn request_revisions(
        &self,
        actor: &AuthenticatedUser,
        command: RequestRevisionsCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "review")?;

        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;

        let prior_status = article.status;
        let original_updated_at = article.updated_at;
        let now = self.clock.now();
        article.request_revisions(now)?;

        let mut update =
            ArticleUpdate::new(id, original_updated_at).with_workflow_state(prior_status, &article);
        update.set_updated_at(article.updated_at);
        let updated = self.write_repo.update(update).await?;

        self.events
            .publish(ArticleEvent::RevisionsRequested { id, at: now });
        Ok(updated.into())
    }

    pub async fn approve_article(
        &self,
        actor: &AuthenticatedUser,
        command: ApproveArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "review")?;

        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;

        let prior_status = article.status;
        let original_updated_at = article.updated_at;
        let now = self.clock.now();
        article.approve(now)?;

        let mut update =
            ArticleUpdate::new(id, original_updated_at).with_workflow_state(prior_status, &article);
        update.set_updated_at(article.updated_at);
        let updated = self.write_repo.update(update).await?;

        self.events.publish(ArticleEvent::Approved { id, at: now });
        Ok(updated.into())
    }

    pub(super) async fn load(&self, id: ArticleId) -> ApplicationResult<Article> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }
}
