//! # File Collector Module
//!
//! This module walks the workspace and collects the files a project-wide
//! update should visit, and converts paths to the workspace-relative form
//! that scopes and ignore patterns are matched against.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::ignore::IgnoreList;
use crate::scope::ScopeSet;

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Walking the workspace without following symlinks
/// - Pruning `.git` and ignored directories
/// - Keeping only files that fall into some scope
pub struct FileCollector {
  /// Root of the workspace
  workspace_root: PathBuf,
}

impl FileCollector {
  pub const fn new(workspace_root: PathBuf) -> Self {
    Self { workspace_root }
  }

  /// Collects every in-scope, non-ignored file under the workspace root.
  ///
  /// Directory read errors are logged and skipped. The result is sorted so
  /// runs are reproducible.
  pub fn collect(&self, scopes: &ScopeSet, ignore_list: &IgnoreList) -> Vec<PathBuf> {
    debug!("Scanning workspace: {}", self.workspace_root.display());
    let start_time = std::time::Instant::now();

    let walker = WalkDir::new(&self.workspace_root)
      .follow_links(false)
      .into_iter()
      .filter_entry(|entry| self.keep_entry(entry, ignore_list));

    let mut files = Vec::new();
    for entry_result in walker {
      let entry = match entry_result {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error walking workspace: {}", e);
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let relative = relative_path(entry.path(), &self.workspace_root);
      if scopes.matches_any(&relative) {
        files.push(entry.into_path());
      } else {
        trace!("Skipping: {} (no matching scope)", relative);
      }
    }

    files.sort();
    debug!("Found {} files in {}ms", files.len(), start_time.elapsed().as_millis());
    files
  }

  fn keep_entry(&self, entry: &DirEntry, ignore_list: &IgnoreList) -> bool {
    if entry.depth() == 0 {
      return true;
    }
    if entry.file_type().is_dir() && entry.file_name() == ".git" {
      return false;
    }

    let relative = relative_path(entry.path(), &self.workspace_root);
    if ignore_list.is_ignored(&relative) {
      trace!("Skipping: {} (matches ignore pattern)", relative);
      return false;
    }
    true
  }
}

/// Converts a path to a workspace-relative string with `/` separators.
///
/// Paths outside the workspace come back with leading `..` segments.
pub fn relative_path(path: &Path, workspace_root: &Path) -> String {
  let relative = match path.strip_prefix(workspace_root) {
    Ok(stripped) => stripped.to_path_buf(),
    Err(_) => pathdiff::diff_paths(path, workspace_root).unwrap_or_else(|| path.to_path_buf()),
  };

  let segments: Vec<String> = relative
    .components()
    .filter(|component| !matches!(component, Component::CurDir))
    .map(|component| component.as_os_str().to_string_lossy().into_owned())
    .collect();
  segments.join("/")
}

/// Converts a potentially relative path to an absolute one.
///
/// When the parent directory exists it is canonicalized, so `..` segments
/// and symlinked directories resolve the same way as the workspace root.
/// The file name itself is kept as given.
pub fn absolutize_path(path: &Path, current_dir: &Path) -> PathBuf {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    current_dir.join(path)
  };

  match (absolute.parent(), absolute.file_name()) {
    (Some(parent), Some(file_name)) => match parent.canonicalize() {
      Ok(parent) => parent.join(file_name),
      Err(_) => absolute,
    },
    _ => absolute,
  }
}
