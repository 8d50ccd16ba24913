//! Domain models: problems, their difficulty, worked examples and summaries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Problem difficulty. Parsed case-insensitively; anything unexpected is `Unknown`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
  #[default]
  Unknown,
}

impl From<String> for Difficulty {
  fn from(raw: String) -> Self {
    match raw.trim().to_lowercase().as_str() {
      "easy" => Difficulty::Easy,
      "medium" => Difficulty::Medium,
      "hard" => Difficulty::Hard,
      _ => Difficulty::Unknown,
    }
  }
}

/// One worked example shown under the description.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Example {
  #[serde(default)] pub example_num: Option<u32>,
  #[serde(default)] pub example_text: String,
}

/// Full problem as loaded from the data file. Immutable once loaded.
///
/// `code_snippets` keeps declaration order: the first key is the fallback
/// active language when a previously active one is unavailable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Problem {
  pub slug: String,
  #[serde(default)] pub title: String,
  #[serde(default)] pub difficulty: Difficulty,
  #[serde(default)] pub topics: Vec<String>,
  #[serde(default)] pub description: String,
  #[serde(default)] pub examples: Vec<Example>,
  #[serde(default)] pub code_snippets: Option<IndexMap<String, String>>,
}

impl Problem {
  pub fn summary(&self) -> ProblemSummary {
    ProblemSummary {
      slug: self.slug.clone(),
      title: self.title.clone(),
      difficulty: self.difficulty,
      topics: self.topics.clone(),
    }
  }
}

/// List entry for the problem dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProblemSummary {
  pub slug: String,
  pub title: String,
  pub difficulty: Difficulty,
  pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn difficulty_parses_case_insensitively() {
    let p: Problem = serde_json::from_str(r#"{"slug":"a","difficulty":"Medium"}"#).unwrap();
    assert_eq!(p.difficulty, Difficulty::Medium);
    let p: Problem = serde_json::from_str(r#"{"slug":"a","difficulty":"brutal"}"#).unwrap();
    assert_eq!(p.difficulty, Difficulty::Unknown);
    let p: Problem = serde_json::from_str(r#"{"slug":"a"}"#).unwrap();
    assert_eq!(p.difficulty, Difficulty::Unknown);
  }

  #[test]
  fn snippets_keep_declaration_order() {
    let p: Problem = serde_json::from_str(
      r#"{"slug":"a","code_snippets":{"python3":"p","cpp":"c","java":"j"}}"#,
    )
    .unwrap();
    let keys: Vec<_> = p.code_snippets.unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["python3", "cpp", "java"]);
  }
}
