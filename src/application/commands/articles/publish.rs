// src/application/commands/articles/publish.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::{ArticleEvent, ArticleId, ArticleUpdate},
};

/// Immediate publication of an APPROVED article. Scheduled articles are
/// deliberately out of reach here: once handed to the sweep, only the
/// sweep publishes them.
pub struct PublishArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn publish_article(
        &self,
        actor: &AuthenticatedUser,
        command: PublishArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "publish")?;

        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;

        let prior_status = article.status;
        let original_updated_at = article.updated_at;
        let now = self.clock.now();
        article.publish(now)?;

        let mut update =
            ArticleUpdate::new(id, original_updated_at).with_workflow_state(prior_status, &article);
        update.set_updated_at(article.updated_at);
        let updated = self.write_repo.update(update).await?;

        self.events.publish(ArticleEvent::Published { id, at: now });
        Ok(updated.into())
    }
}
