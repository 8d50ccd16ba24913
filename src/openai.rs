//! Minimal OpenAI-compatible client for coding hints.
//!
//! Only chat.completions with a plain-text reply is used. Calls log model
//! name, latency and sizes, never the user's code or the API key.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::error::AssistError;
use crate::util::{fill_template, preview};

/// What the hint prompt is built from.
#[derive(Clone, Debug, Default)]
pub struct HintRequest {
  pub title: String,
  pub description: String,
  pub language: String,
  pub code: String,
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_plain(&self, system: &str, user: &str, temperature: f32) -> Result<String, AssistError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
    };

    let started = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "codepad-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(AssistError::Upstream { status, message });
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(target: "assist", prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, "OpenAI usage");
    }
    let text = body.choices.into_iter().next()
      .and_then(|c| c.message.content)
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
      .ok_or_else(|| AssistError::Decode("empty completion".into()))?;
    info!(target: "assist", elapsed = ?started.elapsed(), reply = %preview(&text, 60), "Hint completion received");
    Ok(text)
  }

  /// A short nudge for the user's current draft; never a full solution.
  #[instrument(level = "info", skip(self, prompts, req), fields(language = %req.language, code_len = req.code.len()))]
  pub async fn hint(&self, prompts: &Prompts, req: &HintRequest) -> Result<String, AssistError> {
    let user = render_hint_prompt(prompts, req);
    self.chat_plain(&prompts.hint_system, &user, 0.2).await
  }
}

pub fn render_hint_prompt(prompts: &Prompts, req: &HintRequest) -> String {
  fill_template(
    &prompts.hint_user_template,
    &[
      ("title", req.title.as_str()),
      ("description", req.description.as_str()),
      ("language", req.language.as_str()),
      ("code", req.code.as_str()),
    ],
  )
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
