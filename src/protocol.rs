//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::ProblemSummary;
use crate::markdown::DescriptionView;
use crate::workspace::editor::EditorView;

/// Messages the client can send over WebSocket. One connection = one workspace.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    SelectProblem {
        slug: String,
    },
    ClearProblem,
    SetLanguage {
        language: String,
    },
    Write {
        text: String,
    },
    Read,
    EditorMounted,
    PointerDown {
        left: f64,
        width: f64,
    },
    PointerMove {
        x: f64,
    },
    PointerUp,
    Resize,
    Hint,
    Run,
}

impl ClientWsMessage {
    /// Wire tag, for logs that must not carry user code.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientWsMessage::Ping => "ping",
            ClientWsMessage::SelectProblem { .. } => "select_problem",
            ClientWsMessage::ClearProblem => "clear_problem",
            ClientWsMessage::SetLanguage { .. } => "set_language",
            ClientWsMessage::Write { .. } => "write",
            ClientWsMessage::Read => "read",
            ClientWsMessage::EditorMounted => "editor_mounted",
            ClientWsMessage::PointerDown { .. } => "pointer_down",
            ClientWsMessage::PointerMove { .. } => "pointer_move",
            ClientWsMessage::PointerUp => "pointer_up",
            ClientWsMessage::Resize => "resize",
            ClientWsMessage::Hint => "hint",
            ClientWsMessage::Run => "run",
        }
    }
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Editor {
        view: EditorView,
    },
    Description {
        view: DescriptionView,
    },
    Split {
        fraction: f64,
        dragging: bool,
    },
    Layout {
        version: u64,
    },
    Hint {
        text: String,
    },
    RunResult {
        output: serde_json::Value,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Default, Deserialize)]
pub struct ProblemsQuery {
    pub topic: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct ProblemsOut {
    pub problems: Vec<ProblemSummary>,
}

#[derive(Serialize)]
pub struct TopicsOut {
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintIn {
    #[serde(default)]
    pub problem_slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    pub language: String,
}
#[derive(Serialize)]
pub struct HintOut {
    pub suggestion: String,
}

#[derive(Debug, Deserialize)]
pub struct RunIn {
    pub language: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub problems: usize,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
