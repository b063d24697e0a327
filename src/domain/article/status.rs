// src/domain/article/status.rs
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed alphabet of the editorial workflow. Persisted as text; every
/// read parses back through this enum, and every transition is validated
/// against [`ArticleStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    InReview,
    NeedsRevisions,
    Approved,
    Scheduled,
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::InReview => "in_review",
            ArticleStatus::NeedsRevisions => "needs_revisions",
            ArticleStatus::Approved => "approved",
            ArticleStatus::Scheduled => "scheduled",
            ArticleStatus::Published => "published",
        }
    }

    /// The workflow transition table. Anything not listed here is rejected
    /// with a conflict by the entity's transition methods.
    pub fn can_transition_to(self, next: ArticleStatus) -> bool {
        use ArticleStatus as S;
        matches!(
            (self, next),
            (S::Draft, S::InReview)
                | (S::NeedsRevisions, S::InReview)
                | (S::InReview, S::NeedsRevisions)
                | (S::InReview, S::Approved)
                | (S::Approved, S::Scheduled)
                | (S::Approved, S::Published)
                | (S::Scheduled, S::Published)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ArticleStatus::Published)
    }

    /// Revision notes attach only while the author is being asked for
    /// changes.
    pub fn accepts_revision_notes(self) -> bool {
        matches!(self, ArticleStatus::NeedsRevisions)
    }

    /// Once scheduled, an article belongs to the publication sweep; its
    /// content is no longer editable through the authoring API.
    pub fn content_frozen(self) -> bool {
        matches!(self, ArticleStatus::Scheduled | ArticleStatus::Published)
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ArticleStatus::Draft),
            "in_review" => Ok(ArticleStatus::InReview),
            "needs_revisions" => Ok(ArticleStatus::NeedsRevisions),
            "approved" => Ok(ArticleStatus::Approved),
            "scheduled" => Ok(ArticleStatus::Scheduled),
            "published" => Ok(ArticleStatus::Published),
            other => Err(DomainError::Validation(format!(
                "unknown article status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArticleStatus as S;
    use std::str::FromStr;

    #[test]
    fn forward_path_is_permitted() {
        assert!(S::Draft.can_transition_to(S::InReview));
        assert!(S::InReview.can_transition_to(S::NeedsRevisions));
        assert!(S::InReview.can_transition_to(S::Approved));
        assert!(S::NeedsRevisions.can_transition_to(S::InReview));
        assert!(S::Approved.can_transition_to(S::Scheduled));
        assert!(S::Approved.can_transition_to(S::Published));
        assert!(S::Scheduled.can_transition_to(S::Published));
    }

    #[test]
    fn shortcuts_and_reversals_are_rejected() {
        assert!(!S::Draft.can_transition_to(S::Published));
        assert!(!S::Draft.can_transition_to(S::Approved));
        assert!(!S::InReview.can_transition_to(S::Draft));
        assert!(!S::Scheduled.can_transition_to(S::Approved));
        assert!(!S::Scheduled.can_transition_to(S::Scheduled));
    }

    #[test]
    fn published_is_terminal() {
        for next in [
            S::Draft,
            S::InReview,
            S::NeedsRevisions,
            S::Approved,
            S::Scheduled,
            S::Published,
        ] {
            assert!(!S::Published.can_transition_to(next));
        }
        assert!(S::Published.is_terminal());
    }

    #[test]
    fn round_trips_through_text() {
        for status in [
            S::Draft,
            S::InReview,
            S::NeedsRevisions,
            S::Approved,
            S::Scheduled,
            S::Published,
        ] {
            assert_eq!(S::from_str(status.as_str()).unwrap(), status);
        }
        assert!(S::from_str("retracted").is_err());
    }
}
