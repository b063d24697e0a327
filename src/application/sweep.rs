// src/application/sweep.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        events::EventBus,
        ports::time::Clock,
    },
    domain::article::{ArticleEvent, ArticleReadRepository, ArticleWriteRepository},
};

/// Outcome of one sweep tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SweepReport {
    /// Articles matching the due predicate when the tick started.
    pub due: usize,
    pub published: usize,
    pub failed: usize,
}

/// Promotes due SCHEDULED articles to PUBLISHED.
///
/// One timestamp is taken per sweep and used for both the selection and
/// every `published_at` it stamps, so a row cannot slip between the read
/// and the write because of clock movement. Each promotion is a single-row
/// conditional update keyed on `status = SCHEDULED`; re-running the sweep
/// is a no-op because already-published rows fall out of the predicate.
pub struct PublicationSweep {
    read_repo: Arc<dyn ArticleReadRepository>,
    write_repo: Arc<dyn ArticleWriteRepository>,
    clock: Arc<dyn Clock>,
    events: Arc<EventBus>,
}

impl PublicationSweep {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        write_repo: Arc<dyn ArticleWriteRepository>,
        clock: Arc<dyn Clock>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            read_repo,
            write_repo,
            clock,
            events,
        }
    }

    /// One tick. A failure on one article never blocks the rest; it is
    /// logged, counted, and retried naturally on the next tick because the
    /// row still matches the due predicate.
    pub async fn run_once(&self) -> ApplicationResult<SweepReport> {
        let now = self.clock.now();
        let due = self.read_repo.list_due_for_publication(now).await?;

        let mut report = SweepReport {
            due: due.len(),
            ..SweepReport::default()
        };

        for article in due {
            match self.write_repo.mark_published(article.id, now).await {
                Ok(Some(published)) => {
                    report.published += 1;
                    self.events.publish(ArticleEvent::Published {
                        id: published.id,
                        at: now,
                    });
                    tracing::info!(
                        article_id = i64::from(published.id),
                        slug = published.slug.as_str(),
                        "scheduled article published"
                    );
                }
                // Promoted between the listing and the update; the
                // predicate already excluded it, nothing to do.
                Ok(None) => {}
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        article_id = i64::from(article.id),
                        error = %err,
                        "failed to publish scheduled article, will retry next tick"
                    );
                }
            }
        }

        Ok(report)
    }

    /// The guarded entry point for an external scheduled-invocation
    /// facility (or an operator) triggering a tick by hand.
    pub async fn run_once_as(&self, actor: &AuthenticatedUser) -> ApplicationResult<SweepReport> {
        if !actor.has_capability("sweep", "run") {
            return Err(ApplicationError::forbidden("missing capability sweep:run"));
        }
        self.run_once().await
    }
}
