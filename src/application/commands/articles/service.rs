// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{events::EventBus, ports::time::Clock},
    domain::article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) events: Arc<EventBus>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        slug_service: Arc<ArticleSlugService>,
        clock: Arc<dyn Clock>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            clock,
            events,
        }
    }
}
