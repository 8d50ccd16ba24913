//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Hints for the current draft (OpenAI when configured, local otherwise)
//!   - Forwarding drafts to the code runner

use tracing::{error, debug, instrument, warn};

use crate::error::AssistError;
use crate::openai::HintRequest;
use crate::state::AppState;
use crate::workspace::WorkspaceSession;

/// Hint context from a workspace session's current problem and draft.
pub fn hint_request_for(session: &WorkspaceSession) -> Option<HintRequest> {
  let controller = session.controller();
  let problem = controller.problem()?;
  Some(HintRequest {
    title: problem.title.clone(),
    description: problem.description.clone(),
    language: controller.active_language().unwrap_or_default().to_string(),
    code: session.read().to_string(),
  })
}

#[instrument(level = "info", skip(state, req), fields(language = %req.language, code_len = req.code.len()))]
pub async fn get_hint_text(state: &AppState, req: &HintRequest, boilerplate: Option<&str>) -> String {
  if let Some(oa) = &state.openai {
    match oa.hint(&state.prompts, req).await {
      Ok(t) => return t,
      Err(e) => error!(target: "assist", error = %e, "Hint assistant failed; using local hint."),
    }
  }
  debug!(target: "assist", "Hint via local fallback.");
  local_hint(req, boilerplate)
}

#[instrument(level = "info", skip(state, code), fields(%language, code_len = code.len()))]
pub async fn run_code(state: &AppState, language: &str, code: &str) -> Result<serde_json::Value, AssistError> {
  let runner = state.runner.as_ref().ok_or(AssistError::Disabled("code runner"))?;
  runner.execute(language, code).await.map_err(|e| {
    warn!(target: "assist", %language, error = %e, "Code execution failed");
    e
  })
}

// -------- Local fallbacks --------

fn local_hint(req: &HintRequest, boilerplate: Option<&str>) -> String {
  let untouched = req.code.trim().is_empty()
    || boilerplate.is_some_and(|b| b.trim() == req.code.trim());
  if untouched {
    "Start from the examples: restate what goes in and what must come out, then write the simplest brute-force version before optimizing.".into()
  } else if req.language.is_empty() {
    "Trace your code by hand on Example 1 and compare each step against the expected output.".into()
  } else {
    format!(
      "Trace your {} code by hand on Example 1. Check loop bounds and the empty/single-element cases before looking for a faster approach.",
      req.language
    )
  }
}
