//! Description pane input: problem markdown split into prose and fenced
//! code blocks, with inline code spans marked, plus numbered examples.
//!
//! Rendering to visuals is the client's job; this only separates the
//! pieces the renderer treats differently.

use serde::Serialize;

use crate::domain::Problem;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
  Text { text: String },
  InlineCode { code: String },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
  Prose { spans: Vec<Span> },
  FencedCode { lang: Option<String>, code: String },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExampleBlock {
  pub number: u32,
  pub text: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DescriptionView {
  pub slug: String,
  pub title: String,
  pub raw: String,
  pub blocks: Vec<Block>,
  pub examples: Vec<ExampleBlock>,
}

impl DescriptionView {
  pub fn from_problem(p: &Problem) -> Self {
    let examples = p
      .examples
      .iter()
      .enumerate()
      .map(|(idx, ex)| ExampleBlock {
        number: ex.example_num.unwrap_or(idx as u32 + 1),
        text: ex.example_text.clone(),
      })
      .collect();
    Self {
      slug: p.slug.clone(),
      title: p.title.clone(),
      raw: p.description.clone(),
      blocks: split_blocks(&p.description),
      examples,
    }
  }
}

/// Opening/closing fence: three or more backticks, at most 3 spaces indent.
fn fence_of(line: &str) -> Option<(usize, &str)> {
  let trimmed = line.trim_start_matches(' ');
  if line.len() - trimmed.len() > 3 {
    return None;
  }
  let ticks = trimmed.chars().take_while(|c| *c == '`').count();
  if ticks < 3 {
    return None;
  }
  Some((ticks, trimmed[ticks..].trim()))
}

pub fn split_blocks(src: &str) -> Vec<Block> {
  let mut blocks = Vec::new();
  let mut prose = String::new();
  let mut lines = src.lines();

  while let Some(line) = lines.next() {
    let Some((ticks, info)) = fence_of(line) else {
      prose.push_str(line);
      prose.push('\n');
      continue;
    };
    flush_prose(&mut prose, &mut blocks);

    let lang = info.split_whitespace().next().map(str::to_string);
    let mut code = String::new();
    for inner in lines.by_ref() {
      if matches!(fence_of(inner), Some((n, rest)) if n >= ticks && rest.is_empty()) {
        break;
      }
      code.push_str(inner);
      code.push('\n');
    }
    // unterminated fences run to the end of the text
    if code.ends_with('\n') {
      code.pop();
    }
    blocks.push(Block::FencedCode { lang, code });
  }
  flush_prose(&mut prose, &mut blocks);
  blocks
}

fn flush_prose(prose: &mut String, blocks: &mut Vec<Block>) {
  let text = std::mem::take(prose);
  let text = text.trim_matches('\n');
  if !text.trim().is_empty() {
    blocks.push(Block::Prose { spans: inline_spans(text) });
  }
}

/// Split prose into text and inline code. A span opened by N backticks is
/// closed by the next run of exactly N; unmatched runs stay literal.
pub fn inline_spans(text: &str) -> Vec<Span> {
  let mut spans = Vec::new();
  let mut plain = String::new();
  let mut rest = text;

  while let Some(start) = rest.find('`') {
    let run = rest[start..].chars().take_while(|c| *c == '`').count();
    let after = &rest[start + run..];
    match find_closing_run(after, run) {
      Some(end) => {
        plain.push_str(&rest[..start]);
        if !plain.is_empty() {
          spans.push(Span::Text { text: std::mem::take(&mut plain) });
        }
        let code = &after[..end];
        let code = if run > 1 { code.trim() } else { code };
        spans.push(Span::InlineCode { code: code.to_string() });
        rest = &after[end + run..];
      }
      None => {
        plain.push_str(&rest[..start + run]);
        rest = after;
      }
    }
  }
  plain.push_str(rest);
  if !plain.is_empty() {
    spans.push(Span::Text { text: plain });
  }
  spans
}

fn find_closing_run(s: &str, run: usize) -> Option<usize> {
  let bytes = s.as_bytes();
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] == b'`' {
      let len = bytes[i..].iter().take_while(|b| **b == b'`').count();
      if len == run {
        return Some(i);
      }
      i += len;
    } else {
      i += 1;
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Example;

  #[test]
  fn fenced_and_inline_code_are_distinguished() {
    let src = "Given `nums`, return it.\n\n```python\nprint(nums)\n```\nDone.";
    let blocks = split_blocks(src);
    assert_eq!(
      blocks,
      vec![
        Block::Prose {
          spans: vec![
            Span::Text { text: "Given ".into() },
            Span::InlineCode { code: "nums".into() },
            Span::Text { text: ", return it.".into() },
          ]
        },
        Block::FencedCode { lang: Some("python".into()), code: "print(nums)".into() },
        Block::Prose { spans: vec![Span::Text { text: "Done.".into() }] },
      ]
    );
  }

  #[test]
  fn unterminated_fence_runs_to_end() {
    let blocks = split_blocks("```\na\nb\n");
    assert_eq!(blocks, vec![Block::FencedCode { lang: None, code: "a\nb".into() }]);
  }

  #[test]
  fn unmatched_backtick_stays_literal() {
    assert_eq!(inline_spans("a ` b"), vec![Span::Text { text: "a ` b".into() }]);
    assert_eq!(
      inline_spans("``a`b``"),
      vec![Span::InlineCode { code: "a`b".into() }]
    );
  }

  #[test]
  fn examples_are_numbered_by_position_when_missing() {
    let p = Problem {
      slug: "s".into(),
      title: "S".into(),
      difficulty: Default::default(),
      topics: vec![],
      description: "Text".into(),
      examples: vec![
        Example { example_num: None, example_text: "in: 1".into() },
        Example { example_num: Some(7), example_text: "in: 2".into() },
        Example { example_num: None, example_text: "in: 3".into() },
      ],
      code_snippets: None,
    };
    let view = DescriptionView::from_problem(&p);
    let numbers: Vec<_> = view.examples.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![1, 7, 3]);
    assert_eq!(view.raw, "Text");
  }
}
