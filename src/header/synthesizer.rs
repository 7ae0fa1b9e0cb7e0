//! Header text synthesis.

/// Converts rendered template lines into comment-prefixed header text.
///
/// Empty lines become a bare `prefix`, other lines `prefix + " " + line`,
/// each terminated by `\n`. When `region_empty` is set the header is being
/// inserted fresh, and one extra empty line separates it from the body; a
/// replaced header keeps whatever separator already follows it.
pub fn synthesize<S: AsRef<str>>(content_lines: &[S], prefix: &str, region_empty: bool) -> String {
  let mut text = String::new();

  for line in content_lines {
    let line = line.as_ref();
    text.push_str(prefix);
    if !line.is_empty() {
      text.push(' ');
      text.push_str(line);
    }
    text.push('\n');
  }

  if region_empty {
    text.push('\n');
  }

  text
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fresh_insert_adds_separator() {
    let text = synthesize(&["Line A", "", "Line B"], "#", true);
    assert_eq!(text, "# Line A\n#\n# Line B\n\n");
  }

  #[test]
  fn test_replacement_has_no_separator() {
    let text = synthesize(&["new1", "new2"], "#", false);
    assert_eq!(text, "# new1\n# new2\n");
  }

  #[test]
  fn test_single_empty_line() {
    assert_eq!(synthesize(&[""], "//", false), "//\n");
  }

  #[test]
  fn test_indented_content_keeps_its_spaces() {
    assert_eq!(synthesize(&["  indented"], "--", false), "--   indented\n");
  }
}
