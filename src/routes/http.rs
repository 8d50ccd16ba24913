//! HTTP endpoint handlers. These are thin wrappers over the catalog and the
//! shared logic; each is instrumented.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::domain::Problem;
use crate::error::ApiResult;
use crate::logic::{get_hint_text, run_code};
use crate::markdown::DescriptionView;
use crate::openai::HintRequest;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let problems = state.catalog.problems().await.len();
  Json(HealthOut { ok: true, problems })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_problems(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProblemsQuery>,
) -> impl IntoResponse {
  let catalog = state.catalog.problems().await;
  let problems = match (q.topic.as_deref(), q.q.as_deref()) {
    (None, None) => catalog.summaries(),
    (topic, query) => catalog.filter(topic, query.unwrap_or_default()),
  };
  info!(target: "catalog", count = problems.len(), "HTTP problem list served");
  Json(ProblemsOut { problems })
}

#[instrument(level = "info", skip(state), fields(%slug))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> ApiResult<Json<Problem>> {
  let problem = state.catalog.problems().await.get(&slug)?;
  Ok(Json(Problem::clone(&problem)))
}

#[instrument(level = "info", skip(state), fields(%slug))]
pub async fn http_get_description(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> ApiResult<Json<DescriptionView>> {
  let problem = state.catalog.problems().await.get(&slug)?;
  Ok(Json(DescriptionView::from_problem(&problem)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TopicsOut { topics: state.catalog.problems().await.topics() })
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language, code_len = body.code.len()))]
pub async fn http_post_hint(
  State(state): State<Arc<AppState>>,
  Json(body): Json<HintIn>,
) -> impl IntoResponse {
  let boilerplate = match body.problem_slug.as_deref() {
    Some(slug) => state
      .catalog
      .problems()
      .await
      .get(slug)
      .ok()
      .and_then(|p| p.code_snippets.as_ref().and_then(|s| s.get(&body.language).cloned())),
    None => None,
  };
  let req = HintRequest {
    title: body.title,
    description: body.description,
    language: body.language,
    code: body.code,
  };
  let suggestion = get_hint_text(&state, &req, boilerplate.as_deref()).await;
  Json(HintOut { suggestion })
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language, code_len = body.code.len()))]
pub async fn http_post_run(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RunIn>,
) -> ApiResult<Json<serde_json::Value>> {
  let out = run_code(&state, &body.language, &body.code).await?;
  Ok(Json(out))
}
