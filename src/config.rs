//! Loading application configuration (catalog path, hint prompts, runner
//! endpoint) from TOML, with environment overrides.
//!
//! See `AppConfig` for the expected schema. Every field has a default, so an
//! empty file (or no file) is valid.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct AppConfig {
  #[serde(default)]
  pub catalog: CatalogCfg,
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub runner: RunnerCfg,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogCfg {
  /// JSON array of problems. Overridden by PROBLEMS_PATH.
  pub data_path: String,
}

impl Default for CatalogCfg {
  fn default() -> Self {
    Self { data_path: "./problems_db.json".into() }
  }
}

/// Prompts for the hint assistant. Placeholders: {title}, {description},
/// {language}, {code}.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Prompts {
  pub hint_system: String,
  pub hint_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      hint_system: "You are a helpful coding mentor. Keep hints short and encouraging. Never provide the full corrected code.".into(),
      hint_user_template: "The user is solving a problem titled \"{title}\".\nProblem description: {description}\nUser's current {language} code:\n```{language}\n{code}\n```\n\nProvide a short hint. Point out a bug if there is one, but do NOT write the solution. Help them think through the logic.".into(),
    }
  }
}

/// Remote code execution endpoint (JDoodle-compatible).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerCfg {
  pub base_url: String,
  pub timeout_secs: u64,
}

impl Default for RunnerCfg {
  fn default() -> Self {
    Self { base_url: "https://api.jdoodle.com/v1".into(), timeout_secs: 20 }
  }
}

impl AppConfig {
  /// Config file (if any) plus env overrides.
  pub fn from_env() -> Self {
    let mut cfg = load_config_from_env().unwrap_or_default();
    if let Ok(path) = std::env::var("PROBLEMS_PATH") {
      cfg.catalog.data_path = path;
    }
    if let Ok(url) = std::env::var("RUNNER_BASE_URL") {
      cfg.runner.base_url = url;
    }
    cfg
  }
}

pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Attempt to load `AppConfig` from CODEPAD_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("CODEPAD_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "codepad_backend", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "codepad_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "codepad_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
