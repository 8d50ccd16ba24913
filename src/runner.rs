//! Remote code execution through a JDoodle-compatible HTTP API.
//!
//! The runner is opaque: we map the problem's language id to the runner's
//! (language, version index) pair, forward the source, and pass the JSON
//! reply straight back.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::RunnerCfg;
use crate::error::AssistError;

/// Runner-side language name and version index for a problem language.
pub fn runner_language(language: &str) -> Option<(&'static str, &'static str)> {
  match language {
    "javascript" => Some(("nodejs", "4")),
    "python3" | "python" => Some(("python3", "4")),
    "cpp" => Some(("cpp17", "1")),
    "java" => Some(("java", "4")),
    _ => None,
  }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest<'a> {
  script: &'a str,
  language: &'a str,
  version_index: &'a str,
  client_id: &'a str,
  client_secret: &'a str,
}

#[derive(Clone)]
pub struct CodeRunner {
  client: reqwest::Client,
  base_url: String,
  client_id: String,
  client_secret: String,
}

impl CodeRunner {
  /// Enabled only when RUNNER_CLIENT_ID and RUNNER_CLIENT_SECRET are set.
  pub fn from_env(cfg: &RunnerCfg) -> Option<Self> {
    let client_id = std::env::var("RUNNER_CLIENT_ID").ok()?;
    let client_secret = std::env::var("RUNNER_CLIENT_SECRET").ok()?;
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .ok()?;
    Some(Self { client, base_url: cfg.base_url.clone(), client_id, client_secret })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  #[instrument(level = "info", skip(self, code), fields(%language, code_len = code.len()))]
  pub async fn execute(&self, language: &str, code: &str) -> Result<serde_json::Value, AssistError> {
    let (runner_lang, version_index) = runner_language(language)
      .ok_or_else(|| AssistError::UnsupportedLanguage(language.to_string()))?;

    let req = ExecuteRequest {
      script: code,
      language: runner_lang,
      version_index,
      client_id: &self.client_id,
      client_secret: &self.client_secret,
    };
    let res = self.client.post(format!("{}/execute", self.base_url))
      .header(USER_AGENT, "codepad-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&req).send().await?;

    let status = res.status();
    if !status.is_success() {
      let message = res.text().await.unwrap_or_default();
      return Err(AssistError::Upstream { status: status.as_u16(), message });
    }
    let out: serde_json::Value = res.json().await?;
    info!(target: "assist", %runner_lang, "Code execution finished");
    Ok(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_problem_languages_to_runner_languages() {
    assert_eq!(runner_language("javascript"), Some(("nodejs", "4")));
    assert_eq!(runner_language("python"), runner_language("python3"));
    assert_eq!(runner_language("cpp"), Some(("cpp17", "1")));
    assert_eq!(runner_language("java"), Some(("java", "4")));
    assert_eq!(runner_language("rust"), None);
  }

  #[test]
  fn execute_payload_uses_runner_field_names() {
    let req = ExecuteRequest {
      script: "print(1)",
      language: "python3",
      version_index: "4",
      client_id: "id",
      client_secret: "secret",
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["versionIndex"], "4");
    assert_eq!(v["clientSecret"], "secret");
    assert_eq!(v["script"], "print(1)");
  }
}
