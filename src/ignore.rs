//! # Ignore Module
//!
//! This module determines which workspace paths are left alone.
//!
//! It supports:
//! - Inline regular expressions from the configuration and the command line,
//!   searched anywhere in the relative path
//! - Ignore files listing one pattern per line; each line is anchored at the
//!   start of the relative path, blank lines and `#` comments are skipped,
//!   and lines that are not valid regular expressions are dropped with a
//!   warning

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::{Regex, RegexSet};
use tracing::warn;

use crate::config::ConfigError;
use crate::verbose_log;

/// Compiled ignore patterns matched against workspace-relative paths.
///
/// # Examples
///
/// ```rust
/// use copyright_updater::ignore::IgnoreList;
///
/// # fn main() -> anyhow::Result<()> {
/// let list = IgnoreList::new(vec!["^target/".to_string(), r"\.min\.js$".to_string()])?;
///
/// assert!(list.is_ignored("target/debug/build.rs"));
/// assert!(list.is_ignored("web/app.min.js"));
/// assert!(!list.is_ignored("src/main.rs"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IgnoreList {
  patterns: Vec<String>,
  set: RegexSet,
}

impl Default for IgnoreList {
  fn default() -> Self {
    Self {
      patterns: Vec::new(),
      set: RegexSet::empty(),
    }
  }
}

impl IgnoreList {
  /// Creates an ignore list from inline patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid regular expression.
  pub fn new(patterns: Vec<String>) -> Result<Self> {
    let mut list = Self::default();
    list.extend(patterns)?;
    Ok(list)
  }

  /// Adds inline patterns.
  pub fn extend(&mut self, patterns: impl IntoIterator<Item = String>) -> Result<()> {
    for pattern in patterns {
      if let Err(e) = Regex::new(&pattern) {
        return Err(ConfigError::InvalidPattern { pattern, source: e }.into());
      }
      self.patterns.push(pattern);
    }
    self.rebuild()
  }

  /// Loads an ignore file and adds its patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read.
  pub fn load_ignore_file(&mut self, path: &Path) -> Result<()> {
    verbose_log!("Loading ignore file: {}", path.display());
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read ignore file: {}", path.display()))?;

    for line in content.lines() {
      if line.is_empty() || line.starts_with('#') {
        continue;
      }

      let pattern = format!("^{line}");
      match Regex::new(&pattern) {
        Ok(_) => self.patterns.push(pattern),
        Err(e) => warn!("Skipping invalid pattern '{}' in {}: {}", line, path.display(), e),
      }
    }

    self.rebuild()
  }

  fn rebuild(&mut self) -> Result<()> {
    self.set = RegexSet::new(&self.patterns).with_context(|| "Failed to build ignore pattern set")?;
    Ok(())
  }

  /// Checks whether a workspace-relative path (with `/` separators) is
  /// ignored.
  pub fn is_ignored(&self, relative_path: &str) -> bool {
    self.set.is_match(relative_path)
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}
