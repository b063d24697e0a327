// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{articles::ArticleCommandService, comments::CommentCommandService},
        events::EventBus,
        ports::{security::SessionVerifier, time::Clock, util::SlugGenerator},
        queries::{articles::ArticleQueryService, comments::CommentQueryService},
        sweep::PublicationSweep,
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
        comment::EditorialCommentRepository,
    },
};

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub comment_queries: Arc<CommentQueryService>,
    sweep: Arc<PublicationSweep>,
    session_verifier: Arc<dyn SessionVerifier>,
    events: Arc<EventBus>,
}

impl ApplicationServices {
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        comment_repo: Arc<dyn EditorialCommentRepository>,
        session_verifier: Arc<dyn SessionVerifier>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        events: Arc<EventBus>,
    ) -> Self {
        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&slugger),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
            Arc::clone(&events),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&clock),
        ));

        let comment_queries = Arc::new(CommentQueryService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&article_read_repo),
        ));

        let sweep = Arc::new(PublicationSweep::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&article_write_repo),
            Arc::clone(&clock),
            Arc::clone(&events),
        ));

        Self {
            article_commands,
            article_queries,
            comment_commands,
            comment_queries,
            sweep,
            session_verifier,
            events,
        }
    }

    pub fn sweep(&self) -> Arc<PublicationSweep> {
        Arc::clone(&self.sweep)
    }

    pub fn session_verifier(&self) -> Arc<dyn SessionVerifier> {
        Arc::clone(&self.session_verifier)
    }

    pub fn events(&self) -> Arc<EventBus> {
        Arc::clone(&self.events)
    }
}
