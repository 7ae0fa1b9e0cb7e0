#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Template used by most fixtures; renders to two header lines.
pub const BASIC_TEMPLATE: &str = "<<<\nCopyright {{ year }} {{ author }}\nAll rights reserved.\n>>>\n";

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads `relative` under `root`.
pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Sets up a workspace with a `.copyright.toml` scoping everything to the
/// basic template and an `author` variable.
pub fn setup_basic_workspace(root: &Path) -> Result<()> {
  write_file(
    root,
    ".copyright.toml",
    concat!(
      "ignore = [\"^vendor/\"]\n",
      "\n",
      "[variables]\n",
      "author = \"Test Company\"\n",
      "\n",
      "[[scopes]]\n",
      "pattern = \"\"\n",
      "template = \".copyright.tmpl\"\n",
    ),
  )?;
  write_file(root, ".copyright.tmpl", BASIC_TEMPLATE)
}

/// Expected Rust header for the basic template.
pub fn rust_header(year: &str) -> String {
  format!("// Copyright {year} Test Company\n// All rights reserved.\n")
}
