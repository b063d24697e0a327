// src/application/queries/comments.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, EditorialCommentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        comment::EditorialCommentRepository,
    },
};

pub struct ListArticleCommentsQuery {
    pub article_id: i64,
}

pub struct CommentQueryService {
    comment_repo: Arc<dyn EditorialCommentRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
}

impl CommentQueryService {
    pub fn new(
        comment_repo: Arc<dyn EditorialCommentRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
    ) -> Self {
        Self {
            comment_repo,
            article_repo,
        }
    }

    /// Editors read the whole thread; the owning author reads only the
    /// notes addressed to them.
    pub async fn list_comments(
        &self,
        actor: &AuthenticatedUser,
        query: ListArticleCommentsQuery,
    ) -> ApplicationResult<Vec<EditorialCommentDto>> {
        let article_id = ArticleId::new(query.article_id)?;
        let article = self
            .article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let include_internal = actor.has_capability("comments", "view:internal");
        if !include_internal && actor.id != article.author_id {
            return Err(ApplicationError::forbidden(
                "editorial comments are visible to editors and the article's author",
            ));
        }

        let comments = self
            .comment_repo
            .list_by_article(article_id, include_internal)
            .await?;

        Ok(comments.into_iter().map(Into::into).collect())
    }
}
