//! Per-language draft cache scoped to a single problem.

use indexmap::IndexMap;

use crate::domain::Problem;

/// Language id → current source text, for exactly one problem.
///
/// The key set is fixed at construction to the problem's boilerplate keys;
/// `write` can only replace existing entries, never add new ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftCache {
    drafts: IndexMap<String, String>,
}

impl DraftCache {
    /// Fresh cache seeded from the problem's boilerplate (empty if it has none).
    pub fn from_problem(problem: &Problem) -> Self {
        Self {
            drafts: problem.code_snippets.clone().unwrap_or_default(),
        }
    }

    pub fn contains(&self, language: &str) -> bool {
        self.drafts.contains_key(language)
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.drafts.get(language).map(String::as_str)
    }

    /// Replace the draft for an existing language. Returns false if the
    /// language is not part of this problem.
    pub fn write(&mut self, language: &str, text: String) -> bool {
        match self.drafts.get_mut(language) {
            Some(slot) => {
                *slot = text;
                true
            }
            None => false,
        }
    }

    /// Languages in boilerplate declaration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.drafts.keys().map(String::as_str)
    }

    pub fn first_language(&self) -> Option<&str> {
        self.drafts.keys().next().map(String::as_str)
    }
}
