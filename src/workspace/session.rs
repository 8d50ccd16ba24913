//! Session controller: owns the draft cache and the active-language selector
//! for whichever problem is currently selected.
//!
//! Reset rule: a new draft cache is built only when the selected problem's
//! slug changes. Re-selecting the same slug (even through a freshly fetched
//! `Problem` value) keeps every in-progress draft.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::drafts::DraftCache;
use crate::domain::Problem;
use crate::error::WorkspaceError;

/// Language picked on the very first selection when the problem offers it.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Language selector states. There is no terminal state.
#[derive(Debug)]
pub enum LanguageSelector {
    NoProblem,
    ProblemWithLanguages {
        problem: Arc<Problem>,
        drafts: DraftCache,
        /// `None` only when the problem ships no boilerplate at all.
        active: Option<String>,
    },
}

#[derive(Debug)]
pub struct SessionController {
    selector: LanguageSelector,
    /// Last language the user was on; survives problem switches and clears.
    preferred: String,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            selector: LanguageSelector::NoProblem,
            preferred: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn problem(&self) -> Option<&Arc<Problem>> {
        match &self.selector {
            LanguageSelector::NoProblem => None,
            LanguageSelector::ProblemWithLanguages { problem, .. } => Some(problem),
        }
    }

    pub fn active_language(&self) -> Option<&str> {
        match &self.selector {
            LanguageSelector::ProblemWithLanguages { active: Some(lang), .. } => Some(lang.as_str()),
            _ => None,
        }
    }

    /// Select a problem. Returns true when the draft cache was rebuilt
    /// (the slug changed), false for a same-identity re-selection.
    #[instrument(level = "debug", skip(self, problem), fields(slug = %problem.slug))]
    pub fn on_problem_selected(&mut self, problem: Arc<Problem>) -> bool {
        if let LanguageSelector::ProblemWithLanguages { problem: current, .. } = &mut self.selector {
            if current.slug == problem.slug {
                // A refetched copy may carry fresher text; drafts stay as they are.
                *current = problem;
                debug!(target: "workspace", "Same problem re-selected; drafts preserved");
                return false;
            }
        }

        let drafts = DraftCache::from_problem(&problem);
        let active = if drafts.contains(&self.preferred) {
            Some(self.preferred.clone())
        } else {
            drafts.first_language().map(str::to_string)
        };
        if let Some(lang) = &active {
            self.preferred = lang.clone();
        }
        info!(
            target: "workspace",
            slug = %problem.slug,
            languages = drafts.languages().count(),
            active = ?active,
            "Problem selected; drafts reset from boilerplate"
        );
        self.selector = LanguageSelector::ProblemWithLanguages { problem, drafts, active };
        true
    }

    /// Back to the empty-state placeholder. Drafts of the old problem are dropped.
    pub fn clear_problem(&mut self) {
        if !matches!(self.selector, LanguageSelector::NoProblem) {
            info!(target: "workspace", "Problem cleared");
        }
        self.selector = LanguageSelector::NoProblem;
    }

    pub fn try_set_active_language(&mut self, language: &str) -> Result<(), WorkspaceError> {
        match &mut self.selector {
            LanguageSelector::NoProblem => Err(WorkspaceError::NoActiveProblem),
            LanguageSelector::ProblemWithLanguages { drafts, active, .. } => {
                if !drafts.contains(language) {
                    return Err(WorkspaceError::InvalidLanguageSelection {
                        language: language.to_string(),
                    });
                }
                *active = Some(language.to_string());
                self.preferred = language.to_string();
                Ok(())
            }
        }
    }

    /// Switch the active language; unknown languages are ignored.
    pub fn set_active_language(&mut self, language: &str) {
        if let Err(e) = self.try_set_active_language(language) {
            debug!(target: "workspace", error = %e, "Language switch ignored");
        }
    }

    pub fn try_write(&mut self, text: String) -> Result<(), WorkspaceError> {
        match &mut self.selector {
            LanguageSelector::ProblemWithLanguages { drafts, active: Some(lang), .. } => {
                drafts.write(lang, text);
                Ok(())
            }
            _ => Err(WorkspaceError::NoActiveProblem),
        }
    }

    /// Store `text` as the draft of the active language.
    pub fn write(&mut self, text: String) {
        if let Err(e) = self.try_write(text) {
            debug!(target: "workspace", error = %e, "Write ignored");
        }
    }

    /// Draft of the active language, or "" when there is nothing to show.
    pub fn read(&self) -> &str {
        match &self.selector {
            LanguageSelector::ProblemWithLanguages { drafts, active: Some(lang), .. } => {
                drafts.get(lang).unwrap_or_default()
            }
            _ => "",
        }
    }

    pub fn available_languages(&self) -> Vec<&str> {
        match &self.selector {
            LanguageSelector::NoProblem => Vec::new(),
            LanguageSelector::ProblemWithLanguages { drafts, .. } => drafts.languages().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(slug: &str, snippets: &[(&str, &str)]) -> Arc<Problem> {
        Arc::new(Problem {
            slug: slug.into(),
            title: slug.into(),
            difficulty: Default::default(),
            topics: vec![],
            description: String::new(),
            examples: vec![],
            code_snippets: Some(
                snippets
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        })
    }

    fn sample() -> Arc<Problem> {
        problem(
            "p",
            &[("javascript", "function f(){}"), ("python", "def f(): pass")],
        )
    }

    #[test]
    fn end_to_end_language_switching() {
        let mut s = SessionController::new();
        s.on_problem_selected(sample());
        assert_eq!(s.active_language(), Some("javascript"));
        assert_eq!(s.read(), "function f(){}");

        s.set_active_language("python");
        assert_eq!(s.read(), "def f(): pass");
        s.write("def f(): return 1".into());
        assert_eq!(s.read(), "def f(): return 1");

        s.set_active_language("javascript");
        assert_eq!(s.read(), "function f(){}");
        s.set_active_language("python");
        assert_eq!(s.read(), "def f(): return 1");
    }

    #[test]
    fn same_slug_reselect_keeps_drafts() {
        let mut s = SessionController::new();
        assert!(s.on_problem_selected(sample()));
        s.write("x".into());
        // fresh Arc, same identity
        assert!(!s.on_problem_selected(sample()));
        assert!(!s.on_problem_selected(sample()));
        assert_eq!(s.read(), "x");

        assert!(s.on_problem_selected(problem("q", &[("javascript", "// q")])));
        assert_eq!(s.read(), "// q");
    }

    #[test]
    fn unavailable_language_falls_back_to_first_key() {
        let mut s = SessionController::new();
        s.on_problem_selected(problem("a", &[("js", "a-js"), ("python", "a-py")]));
        s.set_active_language("js");
        s.on_problem_selected(problem("b", &[("python", "b-py"), ("java", "b-java")]));
        assert_eq!(s.active_language(), Some("python"));
        assert_eq!(s.read(), "b-py");
    }

    #[test]
    fn shared_language_survives_switch_with_fresh_boilerplate() {
        let mut s = SessionController::new();
        s.on_problem_selected(problem("a", &[("cpp", "a-cpp"), ("java", "a-java")]));
        s.set_active_language("java");
        s.write("edited".into());
        s.on_problem_selected(problem("b", &[("cpp", "b-cpp"), ("java", "b-java")]));
        assert_eq!(s.active_language(), Some("java"));
        assert_eq!(s.read(), "b-java");
    }

    #[test]
    fn languages_match_boilerplate_keys() {
        let mut s = SessionController::new();
        assert!(s.available_languages().is_empty());
        s.on_problem_selected(problem("a", &[("rust", "r"), ("go", "g"), ("c", "c")]));
        assert_eq!(s.available_languages(), vec!["rust", "go", "c"]);
        assert_eq!(s.read(), "r");
    }

    #[test]
    fn invalid_selection_is_a_no_op() {
        let mut s = SessionController::new();
        assert_eq!(
            s.try_set_active_language("python"),
            Err(WorkspaceError::NoActiveProblem)
        );
        s.on_problem_selected(sample());
        s.write("edited".into());
        assert_eq!(
            s.try_set_active_language("cobol"),
            Err(WorkspaceError::InvalidLanguageSelection { language: "cobol".into() })
        );
        s.set_active_language("cobol");
        assert_eq!(s.active_language(), Some("javascript"));
        assert_eq!(s.read(), "edited");
    }

    #[test]
    fn no_problem_reads_empty_and_ignores_writes() {
        let mut s = SessionController::new();
        assert_eq!(s.read(), "");
        assert_eq!(s.try_write("x".into()), Err(WorkspaceError::NoActiveProblem));
        s.write("x".into());
        assert_eq!(s.read(), "");
    }

    #[test]
    fn problem_without_boilerplate_is_empty_not_broken() {
        let mut s = SessionController::new();
        let mut bare = (*sample()).clone();
        bare.slug = "bare".into();
        bare.code_snippets = None;
        s.on_problem_selected(Arc::new(bare));
        assert!(s.available_languages().is_empty());
        assert_eq!(s.active_language(), None);
        assert_eq!(s.read(), "");
        s.write("ignored".into());
        assert_eq!(s.read(), "");
    }

    #[test]
    fn clearing_then_reselecting_resets_drafts() {
        let mut s = SessionController::new();
        s.on_problem_selected(sample());
        s.set_active_language("python");
        s.write("x".into());
        s.clear_problem();
        assert_eq!(s.read(), "");
        assert!(s.on_problem_selected(sample()));
        assert_eq!(s.active_language(), Some("python"));
        assert_eq!(s.read(), "def f(): pass");
    }
}
