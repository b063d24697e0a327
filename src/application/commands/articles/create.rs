// src/application/commands/articles/create.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::{ArticleBody, ArticleEvent, ArticleTitle, NewArticle, SectionId},
};

/// Every article starts its life as a DRAFT; publication is reached only
/// through the review workflow.
pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
    pub section_id: i64,
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;

        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let section_id = SectionId::new(command.section_id)?;
        let now = self.clock.now();

        let slug = self.slug_service.generate_unique_slug(&title, None).await?;

        let new_article = NewArticle {
            title,
            slug,
            body,
            author_id: actor.id,
            section_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        self.events.publish(ArticleEvent::Created {
            id: created.id,
            author_id: created.author_id,
            at: now,
        });
        Ok(created.into())
    }
}
