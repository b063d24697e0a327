// src/presentation/http/routes.rs
use crate::presentation::http::controllers::{articles, comments, sweep};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    http::Method,
    routing::{get, post},
};
use serde_json::json;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/articles/by-slug/{slug}",
            get(articles::get_article_by_slug),
        )
        .route(
            "/api/v1/articles/{id}",
            get(articles::get_article_by_id).put(articles::update_article),
        )
        .route(
            "/api/v1/articles/{id}/submit",
            post(articles::submit_for_review),
        )
        .route(
            "/api/v1/articles/{id}/request-revisions",
            post(articles::request_revisions),
        )
        .route(
            "/api/v1/articles/{id}/approve",
            post(articles::approve_article),
        )
        .route(
            "/api/v1/articles/{id}/schedule",
            post(articles::schedule_article),
        )
        .route(
            "/api/v1/articles/{id}/publish",
            post(articles::publish_article),
        )
        .route(
            "/api/v1/articles/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/v1/publication-sweep/run", post(sweep::run_sweep))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
