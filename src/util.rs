//! Small helpers shared by the assist clients.

/// `{key}` substitution in one left-to-right pass. Only placeholders written
/// in `tpl` are replaced; braces inside substituted values stay literal.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let after = &rest[open + 1..];
    let hit = after.find('}').and_then(|close| {
      let key = &after[..close];
      pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v, close))
    });
    match hit {
      Some((value, close)) => {
        out.push_str(value);
        rest = &after[close + 1..];
      }
      None => {
        out.push('{');
        rest = after;
      }
    }
  }
  out.push_str(rest);
  out
}

/// Log-safe preview of user text: at most `max` chars, never splits a char.
pub fn preview(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_every_occurrence() {
    let out = fill_template("```{lang}\n{code}\n``` ({lang})", &[("lang", "rust"), ("code", "fn x() {}")]);
    assert_eq!(out, "```rust\nfn x() {}\n``` (rust)");
  }

  #[test]
  fn values_are_never_rescanned() {
    let out = fill_template(
      "Problem: {title}\nLanguage: {language}\n{code}",
      &[("title", "Echo {code} and {language}"), ("language", "python"), ("code", "print('{title}')")],
    );
    assert_eq!(out, "Problem: Echo {code} and {language}\nLanguage: python\nprint('{title}')");
  }

  #[test]
  fn unknown_and_unclosed_braces_stay_literal() {
    assert_eq!(fill_template("{a {lang} {missing} {", &[("lang", "go")]), "{a go {missing} {");
  }

  #[test]
  fn preview_respects_char_boundaries() {
    assert_eq!(preview("short", 10), "short");
    assert_eq!(preview("héllo wörld", 2), "hé… (13 bytes total)");
  }
}
