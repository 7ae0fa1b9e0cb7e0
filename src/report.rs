//! # Report Module
//!
//! This module records what happened to every file a run touched and writes
//! machine-readable JSON reports.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::header::{HeaderOutcome, SkipReason};

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Error message for failed files
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub fn from_outcome(path: impl Into<PathBuf>, outcome: &HeaderOutcome) -> Self {
    Self {
      path: path.into(),
      action: FileAction::from(outcome),
      error: None,
    }
  }

  pub fn failed(path: impl Into<PathBuf>, error: &anyhow::Error) -> Self {
    Self {
      path: path.into(),
      action: FileAction::Failed,
      error: Some(format!("{error:#}")),
    }
  }
}

/// Possible actions taken on a file.
///
/// In check mode `Added` and `Replaced` describe what would happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileAction {
  /// A header was inserted where there was none
  Added,
  /// An existing header was rewritten
  Replaced,
  /// The header already matched the template
  Current,
  /// The path matched the ignore list
  Ignored,
  /// No scope matched the path
  NoScope,
  /// The language has no line-comment syntax
  NoCommentSyntax,
  /// The template rendered to nothing
  EmptyTemplate,
  /// The file could not be processed
  Failed,
}

impl From<&HeaderOutcome> for FileAction {
  fn from(outcome: &HeaderOutcome) -> Self {
    match outcome {
      HeaderOutcome::Updated(edit) if edit.is_insert_only() => FileAction::Added,
      HeaderOutcome::Updated(_) => FileAction::Replaced,
      HeaderOutcome::AlreadyCurrent => FileAction::Current,
      HeaderOutcome::Skipped(SkipReason::Ignored) => FileAction::Ignored,
      HeaderOutcome::Skipped(SkipReason::NoScope) => FileAction::NoScope,
      HeaderOutcome::Skipped(SkipReason::NoCommentSyntax) => FileAction::NoCommentSyntax,
      HeaderOutcome::Skipped(SkipReason::EmptyTemplate) => FileAction::EmptyTemplate,
    }
  }
}

impl FileAction {
  /// Whether the file needs (or got) a header change.
  pub const fn is_change(self) -> bool {
    matches!(self, FileAction::Added | FileAction::Replaced)
  }

  /// Whether the file was passed over without a header check.
  pub const fn is_skip(self) -> bool {
    matches!(
      self,
      FileAction::Ignored | FileAction::NoScope | FileAction::NoCommentSyntax | FileAction::EmptyTemplate
    )
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of a processing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
  pub total: usize,
  pub added: usize,
  pub replaced: usize,
  pub current: usize,
  pub skipped: usize,
  pub failed: usize,
  pub elapsed_ms: u64,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Added => summary.added += 1,
        FileAction::Replaced => summary.replaced += 1,
        FileAction::Current => summary.current += 1,
        FileAction::Failed => summary.failed += 1,
        _ => summary.skipped += 1,
      }
    }

    summary
  }

  /// Number of files whose header changed (or would change).
  pub const fn changed(&self) -> usize {
    self.added + self.replaced
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  check_only: bool,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes a JSON report to `output_path`.
pub fn write_json_report(
  output_path: &Path,
  files: &[FileReport],
  summary: &ProcessingSummary,
  check_only: bool,
) -> Result<()> {
  let report = JsonReport {
    generated_at: Local::now().to_rfc3339(),
    check_only,
    summary,
    files,
  };

  let content = serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize JSON report")?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::header::EditDescriptor;

  fn edit(delete: std::ops::Range<usize>) -> EditDescriptor {
    EditDescriptor {
      insert_at: delete.start,
      delete,
      insert_text: "# h\n".to_string(),
      version: 0,
    }
  }

  #[test]
  fn test_action_from_outcome() {
    assert_eq!(FileAction::from(&HeaderOutcome::Updated(edit(0..0))), FileAction::Added);
    assert_eq!(FileAction::from(&HeaderOutcome::Updated(edit(0..2))), FileAction::Replaced);
    assert_eq!(FileAction::from(&HeaderOutcome::AlreadyCurrent), FileAction::Current);
    assert_eq!(
      FileAction::from(&HeaderOutcome::Skipped(SkipReason::NoScope)),
      FileAction::NoScope
    );
  }

  #[test]
  fn test_action_kinds() {
    assert!(FileAction::Added.is_change());
    assert!(FileAction::Replaced.is_change());
    assert!(!FileAction::Current.is_change());
    assert!(FileAction::EmptyTemplate.is_skip());
    assert!(FileAction::Ignored.is_skip());
    assert!(!FileAction::Current.is_skip());
    assert!(!FileAction::Failed.is_skip());
  }

  #[test]
  fn test_summary_counts() {
    let reports = vec![
      FileReport::from_outcome("a.rs", &HeaderOutcome::Updated(edit(0..0))),
      FileReport::from_outcome("b.rs", &HeaderOutcome::Updated(edit(0..1))),
      FileReport::from_outcome("c.rs", &HeaderOutcome::AlreadyCurrent),
      FileReport::from_outcome("d.css", &HeaderOutcome::Skipped(SkipReason::NoCommentSyntax)),
      FileReport::failed("e.rs", &anyhow::anyhow!("boom")),
    ];

    let summary = ProcessingSummary::from_reports(&reports, Duration::from_millis(12));
    assert_eq!(summary.total, 5);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.replaced, 1);
    assert_eq!(summary.current, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.changed(), 2);
    assert_eq!(summary.elapsed_ms, 12);
  }

  #[test]
  fn test_json_report() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let output = temp_dir.path().join("report.json");
    let reports = vec![
      FileReport::from_outcome("a.rs", &HeaderOutcome::AlreadyCurrent),
      FileReport::failed("b.rs", &anyhow::anyhow!("missing template")),
    ];
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);

    write_json_report(&output, &reports, &summary, true).expect("report should be written");

    let value: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(&output).expect("read report")).expect("valid json");
    assert_eq!(value["check_only"], true);
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["files"][0]["action"], "current");
    assert_eq!(value["files"][1]["action"], "failed");
    assert_eq!(value["files"][1]["error"], "missing template");
  }
}
