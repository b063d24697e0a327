// src/domain/article/entity.rs
use crate::domain::article::status::ArticleStatus;
use crate::domain::article::value_objects::{
    ArticleBody, ArticleId, ArticleSlug, ArticleTitle, SectionId,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub status: ArticleStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
    pub section_id: SectionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    fn transition(&mut self, next: ArticleStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::Conflict(format!(
                "cannot move article from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    pub fn submit_for_review(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(ArticleStatus::InReview, now)
    }

    pub fn request_revisions(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(ArticleStatus::NeedsRevisions, now)
    }

    pub fn approve(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(ArticleStatus::Approved, now)
    }

    /// Hand the article to the publication sweep at `publish_at`. Past
    /// timestamps are accepted; the next sweep picks them up immediately.
    pub fn schedule(&mut self, publish_at: DateTime<Utc>, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(ArticleStatus::Scheduled, now)?;
        self.scheduled_at = Some(publish_at);
        Ok(())
    }

    /// Invariants: `scheduled_at` is cleared (only SCHEDULED rows carry it)
    /// and `published_at`, once set, never moves backwards.
    pub fn publish(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(ArticleStatus::Published, now)?;
        self.scheduled_at = None;
        self.published_at = Some(self.published_at.map_or(now, |at| at.max(now)));
        Ok(())
    }

    pub fn set_content(
        &mut self,
        title: ArticleTitle,
        body: ArticleBody,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status.content_frozen() {
            return Err(DomainError::Conflict(format!(
                "article content is frozen while {}",
                self.status
            )));
        }
        self.title = title;
        self.body = body;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_slug(&mut self, slug: ArticleSlug, now: DateTime<Utc>) {
        self.slug = slug;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub author_id: UserId,
    pub section_id: SectionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status portion of an update. `expected_status` rides into the UPDATE
/// predicate so a transition only lands on the predecessor it was computed
/// from.
#[derive(Debug, Clone)]
pub struct WorkflowStateUpdate {
    pub expected_status: ArticleStatus,
    pub status: ArticleStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub body: Option<ArticleBody>,
    pub workflow: Option<WorkflowStateUpdate>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            body: None,
            workflow: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Record the transition already applied to `article`, guarded on the
    /// status it started from.
    pub fn with_workflow_state(mut self, expected_status: ArticleStatus, article: &Article) -> Self {
        self.workflow = Some(WorkflowStateUpdate {
            expected_status,
            status: article.status,
            scheduled_at: article.scheduled_at,
            published_at: article.published_at,
        });
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}
