// tests/support/builders.rs
use chrono::{DateTime, Utc};

use docket_core::application::dto::AuthenticatedUser;
use docket_core::domain::article::*;
use docket_core::domain::user::{Role, UserId};

use super::mocks::time::fixed_now;

pub struct ArticleBuilder {
    id: i64,
    title: String,
    slug: String,
    body: String,
    status: ArticleStatus,
    scheduled_at: Option<DateTime<Utc>>,
    published_at: Option<DateTime<Utc>>,
    author_id: i64,
    section_id: i64,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            title: "High court weighs venue transfers".into(),
            slug: "high-court-weighs-venue-transfers".into(),
            body: "Test body".into(),
            status: ArticleStatus::Draft,
            scheduled_at: None,
            published_at: None,
            author_id: 1,
            section_id: 1,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.status = ArticleStatus::Scheduled;
        self.scheduled_at = Some(at);
        self
    }

    pub fn author_id(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn build(self) -> Article {
        Article {
            id: ArticleId::new(self.id).unwrap(),
            title: ArticleTitle::new(self.title).unwrap(),
            slug: ArticleSlug::new(self.slug).unwrap(),
            body: ArticleBody::new(self.body).unwrap(),
            status: self.status,
            scheduled_at: self.scheduled_at,
            published_at: self.published_at,
            author_id: UserId::new(self.author_id).unwrap(),
            section_id: SectionId::new(self.section_id).unwrap(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An authenticated caller with the default capability set of their role.
pub fn actor(id: i64, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: format!("user-{id}"),
        role,
        capabilities: role.default_capabilities(),
    }
}
