//! One user's workspace: session controller, split layout and the layout
//! sync signal that ties them to the editor surface.
//!
//! A `WorkspaceSession` is owned by exactly one connection and mutated from
//! one task only; nothing here is shared between sessions.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::domain::Problem;

pub mod drafts;
pub mod editor;
pub mod layout_sync;
pub mod session;
pub mod split;

use editor::EditorView;
use layout_sync::{LayoutCause, LayoutSyncSignal};
use session::SessionController;
use split::{Geometry, SplitLayoutController};

#[derive(Debug, Default)]
pub struct WorkspaceSession {
    controller: SessionController,
    split: SplitLayoutController,
    layout: LayoutSyncSignal,
    mount_pending: bool,
}

impl WorkspaceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn split(&self) -> &SplitLayoutController {
        &self.split
    }

    pub fn layout_version(&self) -> u64 {
        self.layout.version()
    }

    pub fn subscribe_layout(&self) -> watch::Receiver<u64> {
        self.layout.subscribe()
    }

    pub fn editor_view(&self) -> EditorView {
        EditorView::project(&self.controller, self.layout_version())
    }

    /// `None` shows the empty-state placeholder.
    #[instrument(level = "debug", skip_all, fields(slug = problem.as_ref().map(|p| p.slug.as_str())))]
    pub fn select_problem(&mut self, problem: Option<Arc<Problem>>) -> bool {
        let was_visible = self.controller.problem().is_some();
        let reset = match problem {
            Some(p) => self.controller.on_problem_selected(p),
            None => {
                self.controller.clear_problem();
                was_visible
            }
        };
        if was_visible != self.controller.problem().is_some() {
            self.layout.fire(LayoutCause::Visibility);
        }
        reset
    }

    pub fn set_language(&mut self, language: &str) {
        self.controller.set_active_language(language);
    }

    pub fn write(&mut self, text: String) {
        self.controller.write(text);
    }

    pub fn read(&self) -> &str {
        self.controller.read()
    }

    /// The editor surface just mounted. Its first layout is deferred to the
    /// next idle tick, when the container has a measurable size.
    pub fn editor_mounted(&mut self) {
        debug!(target: "workspace", "Editor mounted; first layout deferred to idle");
        self.mount_pending = true;
    }

    /// Run deferred work. Returns the new layout version if a deferred
    /// mount layout fired.
    pub fn on_idle(&mut self) -> Option<u64> {
        if std::mem::take(&mut self.mount_pending) {
            Some(self.layout.fire(LayoutCause::Mounted))
        } else {
            None
        }
    }

    /// A parent container re-laid out; the editor should re-measure.
    pub fn external_resize(&mut self) -> u64 {
        self.layout.fire(LayoutCause::ExternalResize)
    }

    pub fn pointer_down(&mut self, geometry: Geometry) {
        self.split.pointer_down(geometry);
    }

    pub fn pointer_move(&mut self, x: f64) -> Option<f64> {
        self.split.pointer_move(x, &self.layout)
    }

    pub fn pointer_up(&mut self) {
        self.split.pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(slug: &str) -> Arc<Problem> {
        Arc::new(Problem {
            slug: slug.into(),
            title: slug.to_uppercase(),
            difficulty: Default::default(),
            topics: vec![],
            description: String::new(),
            examples: vec![],
            code_snippets: Some(
                [("javascript", "// js"), ("python3", "# py")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        })
    }

    #[test]
    fn mount_layout_runs_on_next_idle_exactly_once() {
        let mut ws = WorkspaceSession::new();
        ws.editor_mounted();
        assert_eq!(ws.layout_version(), 0);
        assert_eq!(ws.on_idle(), Some(1));
        assert_eq!(ws.on_idle(), None);
    }

    #[test]
    fn relayout_never_touches_drafts() {
        let mut ws = WorkspaceSession::new();
        ws.select_problem(Some(problem("a")));
        ws.set_language("python3");
        ws.write("print(1)".into());

        ws.editor_mounted();
        ws.on_idle();
        ws.external_resize();
        ws.external_resize();
        ws.pointer_down(Geometry { left: 0.0, width: 400.0 });
        ws.pointer_move(120.0);
        ws.pointer_up();

        assert_eq!(ws.controller().active_language(), Some("python3"));
        assert_eq!(ws.read(), "print(1)");
        assert_eq!(ws.split().fraction(), 30.0);
    }

    #[test]
    fn visibility_changes_fire_layout() {
        let mut ws = WorkspaceSession::new();
        let v0 = ws.layout_version();
        ws.select_problem(Some(problem("a")));
        let v1 = ws.layout_version();
        assert!(v1 > v0);
        // problem → problem keeps the editor visible
        ws.select_problem(Some(problem("b")));
        assert_eq!(ws.layout_version(), v1);
        ws.select_problem(None);
        assert!(ws.layout_version() > v1);
        assert!(ws.editor_view().disabled);
    }

    #[test]
    fn drag_changes_show_up_in_editor_view() {
        let mut ws = WorkspaceSession::new();
        ws.select_problem(Some(problem("a")));
        let before = ws.editor_view().layout_version;
        ws.pointer_down(Geometry { left: 10.0, width: 100.0 });
        assert_eq!(ws.pointer_move(80.0), Some(70.0));
        ws.pointer_up();
        assert!(ws.editor_view().layout_version > before);
    }
}
