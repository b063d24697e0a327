// src/application/events.rs
use crate::domain::article::ArticleEvent;
use tokio::sync::broadcast;

/// Typed fan-out channel for workflow events. Subscribers hold an owned
/// receiver whose drop ends the subscription; a lagging receiver loses the
/// oldest events rather than blocking publishers.
pub struct EventBus {
    tx: broadcast::Sender<ArticleEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: ArticleEvent) {
        // send only fails when nobody is subscribed, which is fine.
        if self.tx.send(event).is_err() {
            tracing::trace!("article event dropped: no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ArticleEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(128)
    }
}
