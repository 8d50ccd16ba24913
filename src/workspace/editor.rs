//! What the embedded editor surface needs to render: text, language,
//! highlighting mode, and the layout version to watch.

use serde::Serialize;

use super::session::SessionController;

/// Problem-language id → editor syntax-highlighting mode.
pub fn highlight_mode(language: &str) -> &str {
    match language {
        "python3" => "python",
        "golang" => "go",
        other => other,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub problem_slug: Option<String>,
    pub title: String,
    pub language: Option<String>,
    pub highlight: Option<String>,
    pub text: String,
    pub languages: Vec<String>,
    /// No problem, or a problem without boilerplate: render an empty, read-only editor.
    pub disabled: bool,
    pub layout_version: u64,
}

impl EditorView {
    pub fn project(session: &SessionController, layout_version: u64) -> Self {
        let language = session.active_language().map(str::to_string);
        Self {
            problem_slug: session.problem().map(|p| p.slug.clone()),
            title: session.problem().map(|p| p.title.clone()).unwrap_or_default(),
            highlight: language.as_deref().map(|l| highlight_mode(l).to_string()),
            text: session.read().to_string(),
            languages: session.available_languages().into_iter().map(str::to_string).collect(),
            disabled: language.is_none(),
            language,
            layout_version,
        }
    }
}
