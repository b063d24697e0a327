use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleListCursor, ArticleListFilter, ArticleStatus, SectionId},
        errors::DomainError,
    },
};

pub struct ListArticlesQuery {
    pub include_unpublished: bool,
    pub status: Option<ArticleStatus>,
    pub section_id: Option<i64>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let filter = self.normalize_filter(actor, &query)?;
        let limit = Self::normalize_limit(query.limit);
        let cursor = Self::decode_cursor(query.cursor.as_deref())?;

        let (records, next_cursor) = self.read_repo.list_page(filter, limit, cursor).await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(CursorPage::new(
            items,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }

    fn normalize_filter(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: &ListArticlesQuery,
    ) -> ApplicationResult<ArticleListFilter> {
        // A status filter on anything but PUBLISHED is a dashboard view.
        let wants_unpublished = query.include_unpublished
            || query
                .status
                .is_some_and(|status| status != ArticleStatus::Published);

        if wants_unpublished {
            let actor = actor.ok_or_else(|| {
                ApplicationError::forbidden("authentication required for unpublished articles")
            })?;
            if !actor.has_capability("articles", "view:drafts") {
                return Err(ApplicationError::forbidden(
                    "missing capability articles:view:drafts",
                ));
            }
        }

        let section_id = query.section_id.map(SectionId::new).transpose()?;

        Ok(ArticleListFilter {
            published_only: !wants_unpublished,
            status: query.status,
            section_id,
        })
    }

    pub(super) fn normalize_limit(limit: u32) -> u32 {
        const DEFAULT_LIMIT: u32 = 20;
        const MAX_LIMIT: u32 = 100;

        if limit == 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        }
    }

    pub(super) fn decode_cursor(
        token: Option<&str>,
    ) -> ApplicationResult<Option<ArticleListCursor>> {
        match token {
            Some(value) => match ArticleListCursor::decode(value) {
                Ok(cursor) => Ok(Some(cursor)),
                Err(DomainError::Validation(msg)) => Err(ApplicationError::validation(msg)),
                Err(other) => Err(ApplicationError::from(other)),
            },
            None => Ok(None),
        }
    }
}
