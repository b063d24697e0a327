// src/application/commands/articles/submit.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleEvent, ArticleId, ArticleUpdate, specifications::CanSubmitArticleSpec,
    },
};

/// Puts a DRAFT on the review desk, and is equally the author's
/// resubmission path out of NEEDS_REVISIONS.
pub struct SubmitForReviewCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn submit_for_review(
        &self,
        actor: &AuthenticatedUser,
        command: SubmitForReviewCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let submit_spec = CanSubmitArticleSpec::new(&actor.capabilities, &article, actor.id);
        if !submit_spec.is_satisfied() {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to submit article for review",
            ));
        }

        let prior_status = article.status;
        let original_updated_at = article.updated_at;
        let now = self.clock.now();
        article.submit_for_review(now)?;

        let mut update =
            ArticleUpdate::new(id, original_updated_at).with_workflow_state(prior_status, &article);
        update.set_updated_at(article.updated_at);
        let updated = self.write_repo.update(update).await?;

        self.events
            .publish(ArticleEvent::SubmittedForReview { id, at: now });
        Ok(updated.into())
    }
}
