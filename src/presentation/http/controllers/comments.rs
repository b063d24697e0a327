// src/presentation/http/controllers/comments.rs
use crate::application::{
    commands::comments::AddEditorialCommentCommand,
    dto::EditorialCommentDto,
    queries::comments::ListArticleCommentsQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
    #[serde(default)]
    pub is_internal: bool,
}

pub async fn list_comments(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<EditorialCommentDto>>> {
    state
        .services
        .comment_queries
        .list_comments(&user, ListArticleCommentsQuery { article_id: id })
        .await
        .into_http()
        .map(Json)
}

pub async fn create_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> HttpResult<Json<EditorialCommentDto>> {
    let command = AddEditorialCommentCommand {
        article_id: id,
        body: payload.body,
        is_internal: payload.is_internal,
    };

    state
        .services
        .comment_commands
        .add_comment(&user, command)
        .await
        .into_http()
        .map(Json)
}
