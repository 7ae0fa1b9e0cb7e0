//! # Output Module
//!
//! This module centralizes all user-facing output for copyright-updater.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show which files changed without requiring flags
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: In quiet mode only paths are printed

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Skipped
  pub const SKIPPED: &str = "-";
  /// Header changed
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

fn files_word(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, check_only: bool) {
  if is_quiet() {
    return;
  }

  let verb = if check_only { "Checking" } else { "Processing" };
  println!("{} {} {}...", verb, file_count, files_word(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Prints a headed, truncated list of report paths.
///
/// In quiet mode only the paths are printed, one per line, when
/// `paths_in_quiet` is set.
fn print_file_group(header: &str, files: &[&FileReport], paths_in_quiet: bool) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    if paths_in_quiet {
      for file in files {
        println!("{}", file.path.display());
      }
    }
    return;
  }

  println!("{header}");

  let count = files.len();
  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    match file.error {
      Some(ref error) => println!("  {}: {}", file.path.display(), error),
      None => println!("  {}", file.path.display()),
    }
  }

  if !show_all && count > limit {
    println!(
      "  {}",
      format!("... and {} more (use -v to see all)", count - limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the files whose header was rewritten, or would be in check mode.
pub fn print_changed_files(files: &[&FileReport], check_only: bool) {
  let count = files.len();
  let header = if check_only {
    format!(
      "{} {} {} with outdated copyright header:",
      symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
      count,
      files_word(count)
    )
  } else {
    format!(
      "{} Updated copyright header in {} {}:",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      count,
      files_word(count)
    )
  };
  print_file_group(&header, files, check_only);
}

/// Print the files that could not be processed.
pub fn print_failed_files(files: &[&FileReport]) {
  let count = files.len();
  let header = format!(
    "{} Failed to process {} {}:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    files_word(count)
  );
  print_file_group(&header, files, false);
}

/// Print skipped files with their reason. Only shown in verbose mode.
pub fn print_skipped_files(files: &[&FileReport]) {
  if !is_verbose() || is_quiet() || files.is_empty() {
    return;
  }

  println!(
    "{} Skipped {} {}:",
    symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    files.len(),
    files_word(files.len())
  );
  for file in files {
    println!(
      "  {} ({})",
      file.path.display().if_supports_color(Stream::Stdout, |s| s.dimmed()),
      skip_reason(file.action)
    );
  }
}

const fn skip_reason(action: FileAction) -> &'static str {
  match action {
    FileAction::Ignored => "ignored",
    FileAction::NoScope => "no matching scope",
    FileAction::NoCommentSyntax => "no line comment",
    FileAction::EmptyTemplate => "empty template",
    _ => "skipped",
  }
}

/// Print the success message when every header is current.
pub fn print_all_current() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All copyright headers are up to date.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X updated, Y current, Z skipped, W failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let changed = summary.changed();
  let changed_str = if changed > 0 {
    changed.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string()
  } else {
    changed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let failed_str = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  let mut summary_line = format!(
    "Summary: {} {}, {} current, {} skipped, {} failed",
    changed_str,
    if check_only { "outdated" } else { "updated" },
    summary.current.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    failed_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({}ms)", summary.elapsed_ms));
  }

  println!("{summary_line}");
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// File reports grouped for output, each group sorted by path.
pub struct CategorizedReports<'a> {
  /// Headers added or replaced
  pub changed: Vec<&'a FileReport>,
  /// Headers already matching the template
  pub current: Vec<&'a FileReport>,
  /// Files the pipeline skipped
  pub skipped: Vec<&'a FileReport>,
  /// Files that failed
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut changed = Vec::new();
    let mut current = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for report in reports {
      match report.action {
        action if action.is_change() => changed.push(report),
        action if action.is_skip() => skipped.push(report),
        FileAction::Failed => failed.push(report),
        _ => current.push(report),
      }
    }

    for group in [&mut changed, &mut current, &mut skipped, &mut failed] {
      group.sort_by(|a, b| a.path.cmp(&b.path));
    }

    Self {
      changed,
      current,
      skipped,
      failed,
    }
  }
}

/// Prints the complete result of a run.
pub fn print_results(reports: &[FileReport], summary: &ProcessingSummary, check_only: bool) {
  let categorized = CategorizedReports::from_reports(reports);

  print_changed_files(&categorized.changed, check_only);
  print_failed_files(&categorized.failed);
  print_skipped_files(&categorized.skipped);

  if categorized.changed.is_empty() && categorized.failed.is_empty() {
    print_all_current();
  }

  print_blank_line();
  print_summary(summary, check_only);

  if check_only && !categorized.changed.is_empty() {
    print_hint("Run without --check to update the headers.");
  }
}
