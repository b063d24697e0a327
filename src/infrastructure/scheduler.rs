// src/infrastructure/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use crate::application::sweep::PublicationSweep;
use tokio::sync::watch;
use tokio::time;

/// Drives the publication sweep on a fixed interval. The first tick fires
/// immediately, so a sweep runs on process start; ticks never overlap
/// because the loop awaits each sweep before selecting again. Stopping
/// lets an in-flight tick finish its rows.
pub struct PublicationScheduler {
    sweep: Arc<PublicationSweep>,
    interval: Duration,
    shutdown_tx: watch::Sender<bool>,
}

impl PublicationScheduler {
    pub fn new(sweep: Arc<PublicationSweep>, interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            sweep,
            interval,
            shutdown_tx,
        }
    }

    pub async fn run(self: Arc<Self>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "starting publication scheduler"
        );

        let mut ticker = time::interval(self.interval);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.sweep.run_once().await {
                        Ok(report) if report.due > 0 => {
                            tracing::info!(
                                due = report.due,
                                published = report.published,
                                failed = report.failed,
                                "publication sweep finished"
                            );
                        }
                        Ok(_) => {
                            tracing::debug!("no articles due for publication");
                        }
                        Err(err) => {
                            tracing::error!(
                                error = %err,
                                "publication sweep failed, will retry next tick"
                            );
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    break;
                }
            }
        }

        tracing::info!("publication scheduler stopped");
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
