//! Header region detection.
//!
//! A header is the maximal run of comment-prefixed lines that follows the
//! optional leading empty lines of a document. Any prefixed line in that run
//! counts, including ordinary comments that happen to sit right below the
//! header; detection is a syntactic heuristic, not a comment parser.

use std::ops::Range;

use crate::document::Document;

/// Half-open line range `[start, end)` holding the current header.
///
/// An empty region (`start == end`) means the document has no header yet and
/// a new one is inserted at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRegion {
  pub start: usize,
  pub end: usize,
}

impl HeaderRegion {
  pub const fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub const fn range(&self) -> Range<usize> {
    self.start..self.end
  }
}

/// Locates the header region of `document` for the given line-comment prefix.
///
/// `start` is the first non-empty line, or the line count when every line is
/// empty. `end` advances from `start` while lines start with `prefix`.
pub fn detect<D: Document + ?Sized>(document: &D, prefix: &str) -> HeaderRegion {
  let line_count = document.line_count();

  let start = (0..line_count)
    .find(|&idx| !document.line(idx).is_empty())
    .unwrap_or(line_count);

  let end = (start..line_count)
    .find(|&idx| !document.line(idx).starts_with(prefix))
    .unwrap_or(line_count);

  HeaderRegion { start, end }
}
