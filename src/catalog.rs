//! Problem catalog: loads the problem data file once, cleans it, and serves
//! summaries, full problems, topics and dashboard filtering.

use std::{
  collections::{BTreeSet, HashMap, HashSet},
  path::{Path, PathBuf},
  sync::Arc,
};

use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{Problem, ProblemSummary};
use crate::error::CatalogError;
use crate::seeds::seed_problems;

/// Loaded, cleaned problem list with a slug index.
#[derive(Debug, Default)]
pub struct Problems {
  ordered: Vec<Arc<Problem>>,
  by_slug: HashMap<String, usize>,
}

impl Problems {
  pub fn new(raw: Vec<Problem>) -> Self {
    let (kept, dropped) = clean(raw);
    if dropped > 0 {
      warn!(target: "catalog", dropped, kept = kept.len(), "Dropped incomplete or duplicate problems");
    }
    let by_slug = kept.iter().enumerate().map(|(i, p)| (p.slug.clone(), i)).collect();
    Self { ordered: kept.into_iter().map(Arc::new).collect(), by_slug }
  }

  pub fn len(&self) -> usize {
    self.ordered.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ordered.is_empty()
  }

  pub fn summaries(&self) -> Vec<ProblemSummary> {
    self.ordered.iter().map(|p| p.summary()).collect()
  }

  pub fn get(&self, slug: &str) -> Result<Arc<Problem>, CatalogError> {
    self
      .by_slug
      .get(slug)
      .map(|i| self.ordered[*i].clone())
      .ok_or_else(|| CatalogError::NotFound { slug: slug.to_string() })
  }

  /// Sorted, de-duplicated topics across all problems.
  pub fn topics(&self) -> Vec<String> {
    self
      .ordered
      .iter()
      .flat_map(|p| p.topics.iter().cloned())
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }

  /// Dashboard filter: exact topic membership plus case-insensitive
  /// title/slug substring match. Empty query matches everything.
  pub fn filter(&self, topic: Option<&str>, query: &str) -> Vec<ProblemSummary> {
    let q = query.trim().to_lowercase();
    let topic = topic.filter(|t| !t.is_empty());
    self
      .ordered
      .iter()
      .filter(|p| topic.map_or(true, |t| p.topics.iter().any(|pt| pt == t)))
      .filter(|p| {
        q.is_empty() || p.title.to_lowercase().contains(&q) || p.slug.to_lowercase().contains(&q)
      })
      .map(|p| p.summary())
      .collect()
  }
}

/// Lowercase topics; drop entries without slug, title, description or any
/// boilerplate; keep the first of duplicate slugs. Returns (kept, dropped).
fn clean(raw: Vec<Problem>) -> (Vec<Problem>, usize) {
  let total = raw.len();
  let mut seen = HashSet::new();
  let kept: Vec<Problem> = raw
    .into_iter()
    .filter(|p| {
      !p.slug.trim().is_empty()
        && !p.title.trim().is_empty()
        && !p.description.trim().is_empty()
        && p.code_snippets.as_ref().is_some_and(|s| !s.is_empty())
    })
    .filter(|p| seen.insert(p.slug.clone()))
    .map(|mut p| {
      p.topics = p.topics.iter().map(|t| t.to_lowercase()).collect();
      p
    })
    .collect();
  let dropped = total - kept.len();
  (kept, dropped)
}

/// Lazily loaded catalog. The data file is read on first use and cached for
/// the life of the process.
pub struct ProblemCatalog {
  path: Option<PathBuf>,
  cache: OnceCell<Problems>,
}

impl ProblemCatalog {
  pub fn from_path(path: impl Into<PathBuf>) -> Self {
    Self { path: Some(path.into()), cache: OnceCell::new() }
  }

  /// Pre-loaded catalog.
  #[cfg(test)]
  pub fn from_problems(raw: Vec<Problem>) -> Self {
    Self { path: None, cache: OnceCell::new_with(Some(Problems::new(raw))) }
  }

  pub async fn problems(&self) -> &Problems {
    self.cache.get_or_init(|| self.load()).await
  }

  #[instrument(level = "info", skip(self), fields(path = ?self.path))]
  async fn load(&self) -> Problems {
    let Some(path) = &self.path else {
      return Problems::new(seed_problems());
    };
    match read_problems(path).await {
      Ok(raw) => {
        let problems = Problems::new(raw);
        info!(target: "catalog", path = %path.display(), count = problems.len(), "Loaded problem data");
        if problems.is_empty() {
          warn!(target: "catalog", "Problem data has no usable entries; serving built-in problems");
          return Problems::new(seed_problems());
        }
        problems
      }
      Err(e) => {
        error!(target: "catalog", path = %path.display(), error = %e, "Failed to load problem data; serving built-in problems");
        Problems::new(seed_problems())
      }
    }
  }
}

/// Reads the data file entry by entry: a malformed entry (missing slug,
/// `null` field, wrong type) is dropped on its own instead of failing the file.
async fn read_problems(path: &Path) -> Result<Vec<Problem>, CatalogError> {
  let raw = tokio::fs::read_to_string(path).await?;
  let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
  let total = entries.len();
  let problems: Vec<Problem> = entries
    .into_iter()
    .enumerate()
    .filter_map(|(index, entry)| match serde_json::from_value(entry) {
      Ok(p) => Some(p),
      Err(e) => {
        debug!(target: "catalog", index, error = %e, "Skipping malformed problem entry");
        None
      }
    })
    .collect();
  if problems.len() < total {
    warn!(target: "catalog", dropped = total - problems.len(), total, "Dropped malformed problem entries");
  }
  Ok(problems)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Difficulty;

  fn problem(slug: &str, title: &str, topics: &[&str]) -> Problem {
    Problem {
      slug: slug.into(),
      title: title.into(),
      difficulty: Difficulty::Medium,
      topics: topics.iter().map(|t| t.to_string()).collect(),
      description: "desc".into(),
      examples: vec![],
      code_snippets: Some([("python3".to_string(), "pass".to_string())].into_iter().collect()),
    }
  }

  fn sample() -> Problems {
    Problems::new(vec![
      problem("two-sum", "Two Sum", &["Array", "Hash-Table"]),
      problem("lru-cache", "LRU Cache", &["design", "hash-table"]),
      problem("word-search", "Word Search", &["array", "backtracking"]),
    ])
  }

  #[test]
  fn filters_by_topic_and_query() {
    let problems = sample();
    let slugs = |v: Vec<ProblemSummary>| v.into_iter().map(|s| s.slug).collect::<Vec<_>>();

    assert_eq!(slugs(problems.filter(None, "")).len(), 3);
    assert_eq!(slugs(problems.filter(Some("hash-table"), "")), vec!["two-sum", "lru-cache"]);
    assert_eq!(slugs(problems.filter(Some("array"), "  WORD ")), vec!["word-search"]);
    assert_eq!(slugs(problems.filter(None, "lru-")), vec!["lru-cache"]);
    assert_eq!(slugs(problems.filter(Some(""), "sum")), vec!["two-sum"]);
    assert!(problems.filter(Some("graph"), "").is_empty());
  }

  #[test]
  fn topics_are_lowercased_sorted_and_unique() {
    assert_eq!(sample().topics(), vec!["array", "backtracking", "design", "hash-table"]);
  }

  #[test]
  fn incomplete_and_duplicate_entries_are_dropped() {
    let mut no_code = problem("no-code", "No Code", &[]);
    no_code.code_snippets = Some(Default::default());
    let mut no_desc = problem("no-desc", "No Desc", &[]);
    no_desc.description = "  ".into();
    let problems = Problems::new(vec![
      problem("a", "First", &[]),
      problem("a", "Second", &[]),
      no_code,
      no_desc,
    ]);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems.get("a").unwrap().title, "First");
  }

  #[test]
  fn unknown_slug_is_not_found() {
    assert!(matches!(
      sample().get("nope"),
      Err(CatalogError::NotFound { slug }) if slug == "nope"
    ));
  }

  #[tokio::test]
  async fn missing_file_falls_back_to_built_in_problems() {
    let catalog = ProblemCatalog::from_path("/definitely/not/here.json");
    let problems = catalog.problems().await;
    assert!(!problems.is_empty());
    assert!(problems.get("two-sum").is_ok());
  }

  #[tokio::test]
  async fn loads_and_caches_data_file() {
    let path = std::env::temp_dir().join(format!("problems-{}.json", uuid::Uuid::new_v4()));
    let data = serde_json::json!([{
      "slug": "climbing-stairs",
      "title": "Climbing Stairs",
      "difficulty": "Easy",
      "topics": ["Math", "Dynamic Programming"],
      "description": "How many distinct ways?",
      "examples": [{"example_num": 1, "example_text": "n = 2"}],
      "code_snippets": {"python3": "class Solution: ...", "java": "class Solution {}"}
    }]);
    tokio::fs::write(&path, data.to_string()).await.unwrap();

    let catalog = ProblemCatalog::from_path(&path);
    let first = catalog.problems().await.summaries();
    tokio::fs::remove_file(&path).await.unwrap();
    let second = catalog.problems().await.summaries();

    assert_eq!(first, second);
    assert_eq!(first[0].slug, "climbing-stairs");
    assert_eq!(first[0].difficulty, Difficulty::Easy);
    assert_eq!(first[0].topics, vec!["math", "dynamic programming"]);
  }

  #[tokio::test]
  async fn malformed_entries_are_dropped_one_by_one() {
    let path = std::env::temp_dir().join(format!("problems-{}.json", uuid::Uuid::new_v4()));
    let data = serde_json::json!([
      {
        "slug": "good-one",
        "title": "Good One",
        "description": "Works.",
        "code_snippets": {"python3": "pass"}
      },
      {
        "title": "No Slug",
        "description": "Missing its slug.",
        "code_snippets": {"python3": "pass"}
      },
      {
        "slug": "null-desc",
        "title": "Null Description",
        "description": null,
        "code_snippets": {"python3": "pass"}
      }
    ]);
    tokio::fs::write(&path, data.to_string()).await.unwrap();

    let catalog = ProblemCatalog::from_path(&path);
    let slugs: Vec<_> = catalog.problems().await.summaries().into_iter().map(|s| s.slug).collect();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(slugs, vec!["good-one"]);
  }
}
