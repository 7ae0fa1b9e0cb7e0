//! Randomized checks that a rewritten document is never rewritten again.

use copyright_updater::document::TextDocument;
use copyright_updater::header::{HeaderOutcome, rewrite_header};
use copyright_updater::templates::RenderedTemplate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PREFIXES: &[&str] = &["#", "//", "--", ";;"];
const TEMPLATE_LINES: &[&str] = &[
  "",
  "Copyright 2025 Example Corp",
  "  indented line",
  "SPDX-License-Identifier: Apache-2.0",
  "trailing space ",
];

fn pick<'a>(rng: &mut ChaCha8Rng, items: &[&'a str]) -> &'a str {
  items[rng.random_range(0..items.len())]
}

fn random_document(rng: &mut ChaCha8Rng, prefix: &str) -> String {
  let code_lines = ["fn main() {}", "x = 1", "   ", "\t", "code // trailing"];
  let line_count = rng.random_range(0..12);

  let mut lines = Vec::with_capacity(line_count);
  for _ in 0..line_count {
    let line = match rng.random_range(0..4) {
      0 => String::new(),
      1 => format!("{prefix} old header"),
      2 => prefix.to_string(),
      _ => pick(rng, &code_lines).to_string(),
    };
    lines.push(line);
  }

  let mut text = lines.join("\n");
  if !lines.is_empty() && rng.random_bool(0.7) {
    text.push('\n');
  }
  text
}

fn random_template(rng: &mut ChaCha8Rng) -> RenderedTemplate {
  let interior_len = rng.random_range(1..5);
  let interior: Vec<&str> = (0..interior_len).map(|_| pick(rng, TEMPLATE_LINES)).collect();
  let text = format!("<<<\n{}\n>>>", interior.join("\n"));

  RenderedTemplate::from_text(&text)
    .expect("template has delimiters")
    .expect("template has content")
}

#[test]
fn test_random_documents_converge_in_one_pass() {
  let mut rng = ChaCha8Rng::seed_from_u64(0x00c0_ffee);

  for iteration in 0..500 {
    let prefix = pick(&mut rng, PREFIXES);
    let source = random_document(&mut rng, prefix);
    let template = random_template(&mut rng);

    let mut document = TextDocument::new("test", source.clone());
    if let HeaderOutcome::Updated(edit) = rewrite_header(&document, Some(prefix), Some(&template)) {
      document.apply_edit(&edit).expect("planned edit applies");
    }

    let second = rewrite_header(&document, Some(prefix), Some(&template));
    assert_eq!(
      second,
      HeaderOutcome::AlreadyCurrent,
      "iteration {iteration}: source {source:?} with prefix {prefix:?} rewrote to {:?}",
      document.text()
    );
  }
}

#[test]
fn test_header_lines_come_first_after_leading_blanks() {
  let mut rng = ChaCha8Rng::seed_from_u64(7);

  for _ in 0..200 {
    let prefix = pick(&mut rng, PREFIXES);
    let source = random_document(&mut rng, prefix);
    let template = random_template(&mut rng);

    let mut document = TextDocument::new("test", source.clone());
    if let HeaderOutcome::Updated(edit) = rewrite_header(&document, Some(prefix), Some(&template)) {
      document.apply_edit(&edit).expect("planned edit applies");
    }

    let leading_blanks = source.lines().take_while(|line| line.is_empty()).count();
    let header_lines: Vec<&str> = document
      .text()
      .lines()
      .skip(leading_blanks)
      .take(template.lines().len())
      .collect();

    assert_eq!(header_lines.len(), template.lines().len());
    for (line, expected) in header_lines.iter().zip(template.lines()) {
      if expected.is_empty() {
        assert_eq!(*line, prefix);
      } else {
        assert_eq!(*line, format!("{prefix} {expected}"));
      }
    }
  }
}
