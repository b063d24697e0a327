use crate::domain::article::value_objects::ArticleId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// One variant per workflow transition, carried over the typed event bus.
#[derive(Debug, Clone)]
pub enum ArticleEvent {
    Created {
        id: ArticleId,
        author_id: UserId,
        at: DateTime<Utc>,
    },
    SubmittedForReview {
        id: ArticleId,
        at: DateTime<Utc>,
    },
    RevisionsRequested {
        id: ArticleId,
        at: DateTime<Utc>,
    },
    Approved {
        id: ArticleId,
        at: DateTime<Utc>,
    },
    Scheduled {
        id: ArticleId,
        publish_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    Published {
        id: ArticleId,
        at: DateTime<Utc>,
    },
}
