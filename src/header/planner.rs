//! Edit planning.

use std::ops::Range;

use super::region::HeaderRegion;
use crate::document::Document;

/// A replace-region edit: delete the lines in `delete`, then insert
/// `insert_text` at line `insert_at`.
///
/// Both steps address the document revision recorded in `version`, so the
/// host applies them together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDescriptor {
  pub delete: Range<usize>,
  pub insert_at: usize,
  pub insert_text: String,
  pub version: u64,
}

impl EditDescriptor {
  /// Whether the edit only inserts text (no existing header was found).
  pub const fn is_insert_only(&self) -> bool {
    self.delete.start == self.delete.end
  }
}

/// Compares the region's current text with `synthesized` and plans an edit.
///
/// Returns `None` when the document already carries the desired header.
pub fn plan<D: Document + ?Sized>(document: &D, region: HeaderRegion, synthesized: String) -> Option<EditDescriptor> {
  if document.text_in_range(region.range()) == synthesized {
    return None;
  }

  Some(EditDescriptor {
    delete: region.range(),
    insert_at: region.start,
    insert_text: synthesized,
    version: document.version(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::TextDocument;

  #[test]
  fn test_matching_text_is_no_edit() {
    let doc = TextDocument::from_lines("python", &["# hdr", "code"]);
    let region = HeaderRegion { start: 0, end: 1 };
    assert_eq!(plan(&doc, region, "# hdr\n".to_string()), None);
  }

  #[test]
  fn test_different_text_replaces_region() {
    let doc = TextDocument::from_lines("python", &["# old1", "# old2", "code"]);
    let region = HeaderRegion { start: 0, end: 2 };
    let edit = plan(&doc, region, "# new1\n# new2\n".to_string()).expect("edit expected");

    assert_eq!(edit.delete, 0..2);
    assert_eq!(edit.insert_at, 0);
    assert_eq!(edit.insert_text, "# new1\n# new2\n");
    assert!(!edit.is_insert_only());
  }

  #[test]
  fn test_empty_region_is_insert_only() {
    let doc = TextDocument::from_lines("python", &["code"]);
    let edit = plan(&doc, HeaderRegion { start: 0, end: 0 }, "# a\n\n".to_string()).expect("edit expected");
    assert!(edit.is_insert_only());
    assert_eq!(edit.version, 0);
  }

  #[test]
  fn test_crlf_header_is_rewritten() {
    let doc = TextDocument::new("python", "# hdr\r\ncode\r\n");
    let edit = plan(&doc, HeaderRegion { start: 0, end: 1 }, "# hdr\n".to_string());
    assert!(edit.is_some());
  }
}
