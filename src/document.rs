//! # Document Module
//!
//! This module defines the line-addressed document model the header engine
//! reads from, and the in-memory [`TextDocument`] the command-line host uses
//! to apply planned edits before writing files back to disk.

use std::ops::Range;

use crate::header::EditDescriptor;

/// Read-only, line-addressed view of a document.
///
/// Lines are numbered from zero. The text returned by [`Document::line`]
/// excludes the line terminator, while [`Document::text_in_range`] returns the
/// raw text of a half-open line range including every terminator.
pub trait Document {
  /// Language identifier used to look up the comment syntax.
  fn language_id(&self) -> &str;

  /// Total number of lines.
  fn line_count(&self) -> usize;

  /// Text of the line at `index` without its terminator.
  ///
  /// Indices at or past [`Document::line_count`] yield an empty string.
  fn line(&self, index: usize) -> &str;

  /// Raw text covering the lines in `range`, terminators included.
  fn text_in_range(&self, range: Range<usize>) -> &str;

  /// Revision counter, bumped by every applied edit.
  fn version(&self) -> u64;
}

/// Errors raised when applying an edit to a [`TextDocument`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
  /// The edit was planned against a different revision of the document.
  #[error("Edit targets document version {expected}, but the document is at version {actual}")]
  StaleVersion { expected: u64, actual: u64 },

  /// The edit addresses lines that do not exist.
  #[error("Edit range {start}..{end} is out of bounds for a document with {line_count} lines")]
  OutOfBounds {
    start: usize,
    end: usize,
    line_count: usize,
  },

  /// The insertion point is not the start of the deleted range.
  #[error("Insert position {insert_at} does not match the start of the deleted range {start}")]
  MisalignedInsert { insert_at: usize, start: usize },
}

/// An owned text buffer addressed by lines.
///
/// A line is a `\n`-terminated chunk of the text; a final chunk without a
/// terminator is a line as well, so the empty string has zero lines and
/// `"a\nb"` has two. A trailing `\r` belongs to the terminator: it is hidden
/// from [`Document::line`] but kept in [`Document::text_in_range`].
#[derive(Debug, Clone)]
pub struct TextDocument {
  language_id: String,
  text: String,
  line_starts: Vec<usize>,
  version: u64,
}

impl TextDocument {
  /// Creates a document at version 0.
  pub fn new(language_id: impl Into<String>, text: impl Into<String>) -> Self {
    let text = text.into();
    let line_starts = compute_line_starts(&text);
    Self {
      language_id: language_id.into(),
      text,
      line_starts,
      version: 0,
    }
  }

  /// Builds a document from individual lines, each terminated with `\n`.
  pub fn from_lines<S: AsRef<str>>(language_id: impl Into<String>, lines: &[S]) -> Self {
    let mut text = String::new();
    for line in lines {
      text.push_str(line.as_ref());
      text.push('\n');
    }
    Self::new(language_id, text)
  }

  /// The full text of the document.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Applies a delete-then-insert edit as a single step.
  ///
  /// The edit must have been planned against the current version. On
  /// success the version is bumped; on failure the document is unchanged.
  pub fn apply_edit(&mut self, edit: &EditDescriptor) -> Result<(), EditError> {
    if edit.version != self.version {
      return Err(EditError::StaleVersion {
        expected: edit.version,
        actual: self.version,
      });
    }

    let line_count = self.line_count();
    if edit.delete.start > edit.delete.end || edit.delete.end > line_count {
      return Err(EditError::OutOfBounds {
        start: edit.delete.start,
        end: edit.delete.end,
        line_count,
      });
    }

    if edit.insert_at != edit.delete.start {
      return Err(EditError::MisalignedInsert {
        insert_at: edit.insert_at,
        start: edit.delete.start,
      });
    }

    let start = self.offset_of_line(edit.delete.start);
    let end = self.offset_of_line(edit.delete.end);

    let mut text = String::with_capacity(self.text.len() - (end - start) + edit.insert_text.len());
    text.push_str(&self.text[..start]);
    text.push_str(&edit.insert_text);
    text.push_str(&self.text[end..]);

    self.line_starts = compute_line_starts(&text);
    self.text = text;
    self.version += 1;

    Ok(())
  }

  /// Byte offset at which line `index` starts; the text length past the end.
  fn offset_of_line(&self, index: usize) -> usize {
    self.line_starts.get(index).copied().unwrap_or(self.text.len())
  }
}

impl Document for TextDocument {
  fn language_id(&self) -> &str {
    &self.language_id
  }

  fn line_count(&self) -> usize {
    self.line_starts.len()
  }

  fn line(&self, index: usize) -> &str {
    let raw = self.text_in_range(index..index + 1);
    let raw = raw.strip_suffix('\n').unwrap_or(raw);
    raw.strip_suffix('\r').unwrap_or(raw)
  }

  fn text_in_range(&self, range: Range<usize>) -> &str {
    let start = self.offset_of_line(range.start);
    let end = self.offset_of_line(range.end).max(start);
    &self.text[start..end]
  }

  fn version(&self) -> u64 {
    self.version
  }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut starts = vec![0];
  starts.extend(
    text
      .match_indices('\n')
      .map(|(idx, _)| idx + 1)
      .filter(|&next| next < text.len()),
  );
  starts
}
