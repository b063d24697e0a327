// src/application/commands/articles/schedule.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::{ArticleEvent, ArticleId, ArticleUpdate},
};
use chrono::{DateTime, Utc};

/// Hands an APPROVED article to the publication sweep. A `publish_at` in
/// the past is accepted and simply publishes on the next tick. There is no
/// unschedule: from here on the article is the sweep's to mutate.
pub struct ScheduleArticleCommand {
    pub id: i64,
    pub publish_at: DateTime<Utc>,
}

impl ArticleCommandService {
    pub async fn schedule_article(
        &self,
        actor: &AuthenticatedUser,
        command: ScheduleArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "schedule")?;

        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;

        let prior_status = article.status;
        let original_updated_at = article.updated_at;
        let now = self.clock.now();
        article.schedule(command.publish_at, now)?;

        let mut update =
            ArticleUpdate::new(id, original_updated_at).with_workflow_state(prior_status, &article);
        update.set_updated_at(article.updated_at);
        let updated = self.write_repo.update(update).await?;

        self.events.publish(ArticleEvent::Scheduled {
            id,
            publish_at: command.publish_at,
            at: now,
        });
        Ok(updated.into())
    }
}
