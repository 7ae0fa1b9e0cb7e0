//! # Workspace Module
//!
//! This module defines the workspace root that copyright-updater operates
//! on. Scope patterns, ignore patterns and template references are all
//! resolved against it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{DEFAULT_CONFIG_FILENAME, JSON_CONFIG_PATH};

/// Workspace root selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workspace {
  /// Root given explicitly with `--root`.
  Explicit { root: PathBuf },
  /// Nearest ancestor holding a config file or a `.git` directory.
  Discovered { root: PathBuf },
  /// Nothing found; the current directory is used.
  CurrentDir { root: PathBuf },
}

impl Workspace {
  pub fn root(&self) -> &Path {
    match self {
      Self::Explicit { root } | Self::Discovered { root } | Self::CurrentDir { root } => root.as_path(),
    }
  }

  pub fn into_root(self) -> PathBuf {
    match self {
      Self::Explicit { root } | Self::Discovered { root } | Self::CurrentDir { root } => root,
    }
  }
}

/// Resolve the workspace from an explicit root or the current directory.
pub fn resolve_workspace(explicit_root: Option<&Path>) -> Result<Workspace> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;

  if let Some(root) = explicit_root {
    let root = if root.is_absolute() {
      root.to_path_buf()
    } else {
      current_dir.join(root)
    };
    if !root.is_dir() {
      anyhow::bail!("Workspace root is not a directory: {}", root.display());
    }
    let root = root
      .canonicalize()
      .with_context(|| format!("Failed to resolve workspace root: {}", root.display()))?;
    return Ok(Workspace::Explicit { root });
  }

  if let Some(root) = discover_root(&current_dir) {
    debug!("Discovered workspace root: {}", root.display());
    return Ok(Workspace::Discovered { root });
  }

  Ok(Workspace::CurrentDir { root: current_dir })
}

/// Walks up from `start` looking for a directory that marks a workspace.
pub fn discover_root(start: &Path) -> Option<PathBuf> {
  start
    .ancestors()
    .find(|dir| is_workspace_marker(dir))
    .map(Path::to_path_buf)
}

fn is_workspace_marker(dir: &Path) -> bool {
  dir.join(DEFAULT_CONFIG_FILENAME).is_file() || dir.join(JSON_CONFIG_PATH).is_file() || dir.join(".git").exists()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_discover_root_from_nested_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::write(root.join(DEFAULT_CONFIG_FILENAME), "").expect("write config");
    let nested = root.join("a/b/c");
    fs::create_dir_all(&nested).expect("create nested dirs");

    assert_eq!(discover_root(&nested).as_deref(), Some(root));
  }

  #[test]
  fn test_discover_root_prefers_nearest_marker() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join(".git")).expect("create .git");
    let inner = root.join("inner");
    fs::create_dir_all(inner.join(".vscode")).expect("create .vscode");
    fs::write(inner.join(JSON_CONFIG_PATH), "{}").expect("write json config");

    assert_eq!(discover_root(&inner.join("src")).as_deref(), Some(inner.as_path()));
  }

  #[test]
  fn test_explicit_root_must_exist() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing");

    assert!(resolve_workspace(Some(&missing)).is_err());
    let workspace = resolve_workspace(Some(temp_dir.path())).expect("existing root");
    assert_eq!(workspace.root(), temp_dir.path().canonicalize().expect("canonical root"));
  }

  #[test]
  fn test_explicit_root_is_normalized() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let base = temp_dir.path().canonicalize().expect("canonical temp dir");
    fs::create_dir_all(base.join("other")).expect("create other");
    fs::create_dir_all(base.join("proj")).expect("create proj");

    let workspace = resolve_workspace(Some(&base.join("other/../proj"))).expect("existing root");
    assert_eq!(workspace.root(), base.join("proj"));
  }
}
