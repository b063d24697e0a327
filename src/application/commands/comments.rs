// src/application/commands/comments.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, EditorialCommentDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        comment::{CommentBody, EditorialCommentRepository, NewEditorialComment},
    },
};

/// Attaches an editorial note to an article sitting in NEEDS_REVISIONS.
/// `is_internal = false` is the author-visible revision note; `true` stays
/// on the review desk.
pub struct AddEditorialCommentCommand {
    pub article_id: i64,
    pub body: String,
    pub is_internal: bool,
}

pub struct CommentCommandService {
    comment_repo: Arc<dyn EditorialCommentRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentCommandService {
    pub fn new(
        comment_repo: Arc<dyn EditorialCommentRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comment_repo,
            article_repo,
            clock,
        }
    }

    pub async fn add_comment(
        &self,
        actor: &AuthenticatedUser,
        command: AddEditorialCommentCommand,
    ) -> ApplicationResult<EditorialCommentDto> {
        if !actor.has_capability("comments", "create") {
            return Err(ApplicationError::forbidden(
                "missing capability comments:create",
            ));
        }

        let article_id = ArticleId::new(command.article_id)?;
        let article = self
            .article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if !article.status.accepts_revision_notes() {
            return Err(ApplicationError::conflict(format!(
                "editorial comments attach only while revisions are requested, article is {}",
                article.status
            )));
        }

        let body = CommentBody::new(command.body)?;
        let created = self
            .comment_repo
            .insert(NewEditorialComment {
                article_id,
                author_id: actor.id,
                body,
                is_internal: command.is_internal,
                created_at: self.clock.now(),
            })
            .await?;

        Ok(created.into())
    }
}
