//! Application state: the problem catalog, config, and the optional
//! external assist clients.
//!
//! Workspace sessions are deliberately absent: each WebSocket connection
//! owns its own `WorkspaceSession`, so nothing here holds per-user drafts.

use tracing::{info, instrument};

use crate::catalog::ProblemCatalog;
use crate::config::{AppConfig, Prompts};
use crate::openai::OpenAI;
use crate::runner::CodeRunner;

pub struct AppState {
    pub catalog: ProblemCatalog,
    pub prompts: Prompts,
    pub openai: Option<OpenAI>,
    pub runner: Option<CodeRunner>,
}

impl AppState {
    /// Build state from env: load config, point the catalog at its data
    /// file, init the assist clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = AppConfig::from_env();

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "codepad_backend", base_url = %oa.base_url, model = %oa.model, "Hint assistant enabled.");
        } else {
            info!(target: "codepad_backend", "Hint assistant disabled (no OPENAI_API_KEY). Using local hints.");
        }

        let runner = CodeRunner::from_env(&cfg.runner);
        if let Some(r) = &runner {
            info!(target: "codepad_backend", base_url = %r.base_url(), "Code runner enabled.");
        } else {
            info!(target: "codepad_backend", "Code runner disabled (no RUNNER_CLIENT_ID/RUNNER_CLIENT_SECRET).");
        }

        info!(target: "catalog", path = %cfg.catalog.data_path, "Problem data will load on first request");
        Self {
            catalog: ProblemCatalog::from_path(&cfg.catalog.data_path),
            prompts: cfg.prompts,
            openai,
            runner,
        }
    }

    /// State around a fixed catalog with every external service disabled.
    #[cfg(test)]
    pub fn with_catalog(catalog: ProblemCatalog) -> Self {
        Self {
            catalog,
            prompts: Prompts::default(),
            openai: None,
            runner: None,
        }
    }
}
