// src/presentation/http/controllers/sweep.rs
use crate::application::sweep::SweepReport;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};

/// Entry point for an external scheduled-invocation facility: one sweep
/// tick per call, same code path as the in-process scheduler.
pub async fn run_sweep(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<SweepReport>> {
    state
        .services
        .sweep()
        .run_once_as(&user)
        .await
        .into_http()
        .map(Json)
}
