//! # Diff Module
//!
//! This module renders line diffs between a file's current content and the
//! content it would have after its header is rewritten. It is used by
//! `--show-diff` and `--save-diff` to preview changes.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header changes.
///
/// This struct handles:
/// - Generating diffs between original and modified content
/// - Displaying diffs to stderr
/// - Appending diffs to a single consolidated file
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// Path to append diffs to
  pub save_diff_path: Option<PathBuf>,

  /// Serializes writers so diffs from parallel workers don't interleave
  write_lock: Mutex<()>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
      write_lock: Mutex::new(()),
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts from an empty file.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders the diff for one file.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);
    let mut out = format!("Diff for {}:\n", path.display());

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      let _ = write!(out, "{sign}{change}");
      if change.missing_newline() {
        out.push('\n');
      }
    }

    out
  }

  /// Displays and/or saves the diff between the original and new content.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let rendered = Self::render(path, original, new);
    let _guard = self.write_lock.lock().expect("mutex poisoned");

    if self.show_diff {
      eprintln!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      writeln!(file, "{rendered}").with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_render_marks_changes() {
    let rendered = DiffManager::render(Path::new("a.py"), "# old\ncode\n", "# new\ncode\n");

    assert!(rendered.starts_with("Diff for a.py:\n"));
    assert!(rendered.contains("-# old\n"));
    assert!(rendered.contains("+# new\n"));
    assert!(rendered.contains(" code\n"));
  }

  #[test]
  fn test_save_diff_appends() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let diff_path = temp_dir.path().join("changes.diff");
    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init().expect("init should succeed");

    manager
      .display_diff(Path::new("a.py"), "x\n", "# h\n\nx\n")
      .expect("diff should save");
    manager
      .display_diff(Path::new("b.py"), "y\n", "# h\n\ny\n")
      .expect("diff should save");

    let saved = std::fs::read_to_string(&diff_path).expect("read diff");
    assert!(saved.contains("Diff for a.py:"));
    assert!(saved.contains("Diff for b.py:"));
  }

  #[test]
  fn test_disabled_manager_writes_nothing() {
    let manager = DiffManager::new(false, None);
    assert!(!manager.is_enabled());
    assert!(manager.display_diff(Path::new("a.py"), "x", "y").is_ok());
  }
}
