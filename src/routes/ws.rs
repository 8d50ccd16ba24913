//! WebSocket upgrade + workspace session loop.
//!
//! Each connection owns one `WorkspaceSession`. Messages are handled one at
//! a time in this task, so session mutations never interleave. After every
//! message the session's idle tick runs and any layout signal change is
//! pushed to the client as a single, coalesced `layout` message.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug, Instrument};
use uuid::Uuid;

use crate::logic::{get_hint_text, hint_request_for, run_code};
use crate::markdown::DescriptionView;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::workspace::{split::Geometry, WorkspaceSession};

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "codepad_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| {
    let session_id = Uuid::new_v4();
    handle_ws(socket, state).instrument(tracing::info_span!("workspace_session", %session_id))
  })
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "workspace", "WebSocket connected; workspace session opened");
  let mut session = WorkspaceSession::new();
  let mut layout_rx = session.subscribe_layout();

  while let Some(Ok(msg)) = socket.recv().await {
    let replies = match msg {
      Message::Text(txt) => match serde_json::from_str::<ClientWsMessage>(&txt) {
        Ok(incoming) => {
          debug!(target: "workspace", kind = incoming.kind(), "WS received");
          handle_client_ws(incoming, &mut session, &state).await
        }
        Err(e) => vec![ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }],
      },
      Message::Ping(payload) => {
        let _ = socket.send(Message::Pong(payload)).await;
        continue;
      }
      Message::Close(_) => break,
      _ => continue,
    };

    let mut outgoing = replies;
    session.on_idle();
    if layout_rx.has_changed().unwrap_or(false) {
      let version = *layout_rx.borrow_and_update();
      outgoing.push(ServerWsMessage::Layout { version });
    }

    if let Err(e) = send_all(&mut socket, outgoing).await {
      error!(target: "workspace", error = %e, "WS send error");
      break;
    }
  }
  // Dropping the session releases any drag that never saw its pointer-up.
  info!(target: "workspace", dragging = session.split().is_dragging(), "WebSocket disconnected; workspace session closed");
}

async fn send_all(socket: &mut WebSocket, msgs: Vec<ServerWsMessage>) -> Result<(), axum::Error> {
  for msg in msgs {
    let out = serde_json::to_string(&msg).unwrap_or_else(|e| {
      serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
    });
    socket.send(Message::Text(out)).await?;
  }
  Ok(())
}

/// Apply one client message to the session and build the replies.
pub async fn handle_client_ws(
  msg: ClientWsMessage,
  session: &mut WorkspaceSession,
  state: &AppState,
) -> Vec<ServerWsMessage> {
  match msg {
    ClientWsMessage::Ping => vec![ServerWsMessage::Pong],

    ClientWsMessage::SelectProblem { slug } => {
      // Always a fresh lookup: identity (slug), not the object, decides reset.
      match state.catalog.problems().await.get(&slug) {
        Ok(problem) => {
          let description = DescriptionView::from_problem(&problem);
          let reset = session.select_problem(Some(problem));
          info!(target: "workspace", %slug, reset, "WS select_problem applied");
          vec![
            ServerWsMessage::Description { view: description },
            ServerWsMessage::Editor { view: session.editor_view() },
          ]
        }
        Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
      }
    }

    ClientWsMessage::ClearProblem => {
      session.select_problem(None);
      vec![ServerWsMessage::Editor { view: session.editor_view() }]
    }

    ClientWsMessage::SetLanguage { language } => {
      session.set_language(&language);
      vec![ServerWsMessage::Editor { view: session.editor_view() }]
    }

    ClientWsMessage::Write { text } => {
      session.write(text);
      vec![]
    }

    ClientWsMessage::Read => vec![ServerWsMessage::Editor { view: session.editor_view() }],

    ClientWsMessage::EditorMounted => {
      session.editor_mounted();
      vec![]
    }

    ClientWsMessage::PointerDown { left, width } => {
      session.pointer_down(Geometry { left, width });
      vec![split_message(session)]
    }

    ClientWsMessage::PointerMove { x } => match session.pointer_move(x) {
      Some(_) => vec![split_message(session)],
      None => vec![],
    },

    ClientWsMessage::PointerUp => {
      session.pointer_up();
      vec![split_message(session)]
    }

    ClientWsMessage::Resize => {
      session.external_resize();
      vec![]
    }

    ClientWsMessage::Hint => {
      let Some(req) = hint_request_for(session) else {
        return vec![ServerWsMessage::Error { message: "Select a problem first.".into() }];
      };
      let boilerplate = session
        .controller()
        .problem()
        .and_then(|p| p.code_snippets.as_ref())
        .and_then(|s| s.get(&req.language).cloned());
      let text = get_hint_text(state, &req, boilerplate.as_deref()).await;
      vec![ServerWsMessage::Hint { text }]
    }

    ClientWsMessage::Run => {
      let controller = session.controller();
      let Some(language) = controller.active_language() else {
        return vec![ServerWsMessage::Error { message: "Nothing to run: no active language.".into() }];
      };
      match run_code(state, language, controller.read()).await {
        Ok(output) => vec![ServerWsMessage::RunResult { output }],
        Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
      }
    }
  }
}

fn split_message(session: &WorkspaceSession) -> ServerWsMessage {
  ServerWsMessage::Split {
    fraction: session.split().fraction(),
    dragging: session.split().is_dragging(),
  }
}
