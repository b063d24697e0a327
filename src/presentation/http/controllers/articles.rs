// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        ApproveArticleCommand, CreateArticleCommand, PublishArticleCommand,
        RequestRevisionsCommand, ScheduleArticleCommand, SubmitForReviewCommand,
        UpdateArticleCommand,
    },
    dto::{ArticleDto, CursorPage},
    queries::articles::{GetArticleByIdQuery, GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::domain::article::ArticleStatus;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    #[serde(default)]
    pub include_unpublished: bool,
    #[serde(default)]
    pub status: Option<ArticleStatus>,
    #[serde(default)]
    pub section_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
    pub section_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub publish_at: DateTime<Utc>,
}

pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles(
            actor.0.as_ref(),
            ListArticlesQuery {
                include_unpublished: params.include_unpublished,
                status: params.status,
                section_id: params.section_id,
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()
        .map(Json)
}

pub async fn get_article_by_id(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(actor.0.as_ref(), GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_slug(actor.0.as_ref(), GetArticleBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = CreateArticleCommand {
        title: payload.title,
        body: payload.body,
        section_id: payload.section_id,
    };

    state
        .services
        .article_commands
        .create_article(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id,
        title: payload.title,
        body: payload.body,
    };

    state
        .services
        .article_commands
        .update_article(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn submit_for_review(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .submit_for_review(&user, SubmitForReviewCommand { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn request_revisions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .request_revisions(&user, RequestRevisionsCommand { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn approve_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .approve_article(&user, ApproveArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn publish_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .publish_article(&user, PublishArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn schedule_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ScheduleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .schedule_article(
            &user,
            ScheduleArticleCommand {
                id,
                publish_at: payload.publish_at,
            },
        )
        .await
        .into_http()
        .map(Json)
}
