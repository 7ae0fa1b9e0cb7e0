use copyright_updater::document::{Document, TextDocument};
use copyright_updater::header::{HeaderOutcome, HeaderRegion, SkipReason, detect, rewrite_header};
use copyright_updater::templates::RenderedTemplate;

fn template(interior: &[&str]) -> RenderedTemplate {
  let text = format!("<<<\n{}\n>>>", interior.join("\n"));
  RenderedTemplate::from_text(&text)
    .expect("template has delimiters")
    .expect("template has content")
}

fn apply(document: &mut TextDocument, outcome: &HeaderOutcome) {
  if let HeaderOutcome::Updated(edit) = outcome {
    document.apply_edit(edit).expect("edit should apply");
  }
}

#[test]
fn test_empty_document_gets_header_and_blank_line() {
  let document = TextDocument::new("python", "");
  let template = template(&["Line A", "", "Line B"]);

  assert_eq!(detect(&document, "#"), HeaderRegion { start: 0, end: 0 });

  let outcome = rewrite_header(&document, Some("#"), Some(&template));
  let edit = outcome.edit().expect("header should be inserted");
  assert!(edit.is_insert_only());
  assert_eq!(edit.insert_at, 0);
  assert_eq!(edit.insert_text, "# Line A\n#\n# Line B\n\n");
}

#[test]
fn test_existing_header_is_replaced() {
  let document = TextDocument::from_lines("python", &["# old1", "# old2", "code"]);
  let template = template(&["new1", "new2"]);

  assert_eq!(detect(&document, "#"), HeaderRegion { start: 0, end: 2 });

  let outcome = rewrite_header(&document, Some("#"), Some(&template));
  let edit = outcome.edit().expect("header should be replaced");
  assert_eq!(edit.delete, 0..2);
  assert_eq!(edit.insert_at, 0);
  assert_eq!(edit.insert_text, "# new1\n# new2\n");
}

#[test]
fn test_unknown_language_is_skipped() {
  let document = TextDocument::new("plaintext", "hello\n");
  let template = template(&["Copyright"]);

  assert_eq!(
    rewrite_header(&document, None, Some(&template)),
    HeaderOutcome::Skipped(SkipReason::NoCommentSyntax)
  );
}

#[test]
fn test_leading_blank_lines_are_skipped() {
  let document = TextDocument::from_lines("python", &["", "", "# hdr", "code"]);
  assert_eq!(detect(&document, "#"), HeaderRegion { start: 2, end: 3 });
}

#[test]
fn test_adjacent_comments_are_absorbed_into_header() {
  let document = TextDocument::from_lines(
    "python",
    &["# hdr1", "# hdr2", "# not a header, a regular comment", "code"],
  );
  assert_eq!(detect(&document, "#"), HeaderRegion { start: 0, end: 3 });
}

#[test]
fn test_second_run_is_a_no_op() {
  let template = template(&["Copyright 2025 Example", "", "SPDX-License-Identifier: MIT"]);

  for source in [
    "",
    "\n\n",
    "fn main() {}\n",
    "// Copyright 2019 Example\n\nfn main() {}\n",
    "\n\n// stale\n// header\nfn main() {}",
    "// only a comment",
  ] {
    let mut document = TextDocument::new("rust", source);
    let first = rewrite_header(&document, Some("//"), Some(&template));
    apply(&mut document, &first);

    let second = rewrite_header(&document, Some("//"), Some(&template));
    assert_eq!(second, HeaderOutcome::AlreadyCurrent, "not idempotent for {source:?}");
  }
}

#[test]
fn test_current_header_is_left_alone() {
  let document = TextDocument::from_lines("rust", &["// Copyright 2025 Example", "", "fn main() {}"]);
  let template = template(&["Copyright 2025 Example"]);

  assert_eq!(
    rewrite_header(&document, Some("//"), Some(&template)),
    HeaderOutcome::AlreadyCurrent
  );
}

#[test]
fn test_header_keeps_leading_blank_lines() {
  let mut document = TextDocument::new("python", "\n\nprint('hi')\n");
  let template = template(&["Copyright"]);

  let outcome = rewrite_header(&document, Some("#"), Some(&template));
  apply(&mut document, &outcome);

  assert_eq!(document.text(), "\n\n# Copyright\n\nprint('hi')\n");
}

#[test]
fn test_crlf_header_converges_after_one_rewrite() {
  let mut document = TextDocument::new("python", "# Copyright\r\ncode\r\n");
  let template = template(&["Copyright"]);

  assert_eq!(document.line(0), "# Copyright");

  let first = rewrite_header(&document, Some("#"), Some(&template));
  assert!(matches!(first, HeaderOutcome::Updated(_)));
  apply(&mut document, &first);
  assert_eq!(document.text(), "# Copyright\ncode\r\n");

  assert_eq!(
    rewrite_header(&document, Some("#"), Some(&template)),
    HeaderOutcome::AlreadyCurrent
  );
}

#[test]
fn test_single_empty_interior_line() {
  let mut document = TextDocument::new("shellscript", "echo hi\n");
  let template = template(&[""]);

  let outcome = rewrite_header(&document, Some("#"), Some(&template));
  apply(&mut document, &outcome);
  assert_eq!(document.text(), "#\n\necho hi\n");

  assert_eq!(
    rewrite_header(&document, Some("#"), Some(&template)),
    HeaderOutcome::AlreadyCurrent
  );
}

#[test]
fn test_stale_edit_is_rejected() {
  let mut document = TextDocument::new("python", "code\n");
  let template = template(&["Copyright"]);

  let outcome = rewrite_header(&document, Some("#"), Some(&template));
  let edit = outcome.edit().expect("edit planned").clone();

  document.apply_edit(&edit).expect("first application succeeds");
  let text_after = document.text().to_string();

  assert!(document.apply_edit(&edit).is_err());
  assert_eq!(document.text(), text_after);
}
