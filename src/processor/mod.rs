//! # Processor Module
//!
//! This module connects the header engine to real files. It resolves the
//! ignore list, comment syntax, scope and template for each file, runs the
//! header pipeline and writes the result back.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`file_collector`] - Workspace traversal and relative path handling
//!
//! The [`Processor`] struct is the main entry point for all file operations.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use file_collector::{FileCollector, absolutize_path, relative_path};
pub use file_io::FileIO;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::diff::DiffManager;
use crate::document::{Document, TextDocument};
use crate::header::{HeaderOutcome, SkipReason, rewrite_header};
use crate::ignore::IgnoreList;
use crate::language::{BuiltinRegistry, LanguageRegistry, resolve_line_comment};
use crate::report::{FileAction, FileReport};
use crate::scope::ScopeSet;
use crate::templates::{FileTemplateSource, TemplateData, TemplateSource, render};
use crate::verbose_log;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub workspace_root: PathBuf,
  pub scopes: ScopeSet,
  pub template_data: TemplateData,

  // Behavior flags
  pub check_only: bool,
  pub language_override: Option<String>,

  // Optional components
  pub ignore_list: IgnoreList,
  pub registry: Box<dyn LanguageRegistry>,
  pub template_source: Box<dyn TemplateSource>,
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Templates are read from files relative to `workspace_root` and languages
  /// come from the built-in table. Use struct update syntax to override
  /// specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(workspace_root, scopes, template_data)
  /// }
  /// ```
  pub fn new(workspace_root: PathBuf, scopes: ScopeSet, template_data: TemplateData) -> Self {
    Self {
      template_source: Box::new(FileTemplateSource::new(workspace_root.clone())),
      workspace_root,
      scopes,
      template_data,
      check_only: false,
      language_override: None,
      ignore_list: IgnoreList::default(),
      registry: Box::new(BuiltinRegistry),
      diff_manager: None,
    }
  }
}

/// Processor for keeping copyright headers up to date.
///
/// The `Processor` is responsible for:
/// - Deciding per file whether a header applies
/// - Rendering the scope's template for the file
/// - Planning and applying the header edit
/// - Showing diffs and collecting report data
pub struct Processor {
  /// Root of the current workspace.
  workspace_root: PathBuf,

  /// Scopes in declaration order
  scopes: ScopeSet,

  /// Paths excluded from processing
  ignore_list: IgnoreList,

  /// Comment syntax and language identification
  registry: Box<dyn LanguageRegistry>,

  /// Evaluates template references
  template_source: Box<dyn TemplateSource>,

  /// Year, date and user variables for rendering templates
  template_data: TemplateData,

  /// Whether to only report changes without modifying files
  check_only: bool,

  /// Language id used instead of path-based identification
  language_override: Option<String>,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      workspace_root: config.workspace_root,
      scopes: config.scopes,
      ignore_list: config.ignore_list,
      registry: config.registry,
      template_source: config.template_source,
      template_data: config.template_data,
      check_only: config.check_only,
      language_override: config.language_override,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None)),
    }
  }

  pub fn workspace_root(&self) -> &Path {
    &self.workspace_root
  }

  pub const fn is_check_only(&self) -> bool {
    self.check_only
  }

  /// Runs the header pipeline on an open document.
  ///
  /// The checks run in order: ignore list, comment syntax, scope, template.
  /// Each failing check ends the pipeline with a [`HeaderOutcome::Skipped`].
  ///
  /// # Errors
  ///
  /// Returns an error if the scope's template cannot be evaluated.
  pub fn process_document<D: Document + ?Sized>(&self, relative_path: &str, document: &D) -> Result<HeaderOutcome> {
    if self.ignore_list.is_ignored(relative_path) {
      trace!("Skipping: {} (matches ignore pattern)", relative_path);
      return Ok(HeaderOutcome::Skipped(SkipReason::Ignored));
    }

    let Some(prefix) = resolve_line_comment(self.registry.as_ref(), document.language_id()) else {
      trace!(
        "Skipping: {} (no line comment for language '{}')",
        relative_path,
        document.language_id()
      );
      return Ok(HeaderOutcome::Skipped(SkipReason::NoCommentSyntax));
    };

    let Some(scope) = self.scopes.resolve(relative_path) else {
      trace!("Skipping: {} (no matching scope)", relative_path);
      return Ok(HeaderOutcome::Skipped(SkipReason::NoScope));
    };

    let context = self.template_data.context(relative_path);
    let template = render(self.template_source.as_ref(), scope.template(), &context)
      .with_context(|| format!("Failed to render template '{}' for {}", scope.template(), relative_path))?;

    let outcome = rewrite_header(document, Some(prefix.as_str()), template.as_ref());
    debug!("{}: {:?}", relative_path, FileAction::from(&outcome));
    Ok(outcome)
  }

  /// Processes a single file on disk.
  ///
  /// Ignored files and files without a line-comment syntax are skipped
  /// before they are read. Updated content is written back unless the
  /// processor is in check mode.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or written, is not UTF-8,
  /// or its template cannot be evaluated.
  pub fn process_file(&self, path: &Path) -> Result<HeaderOutcome> {
    let relative = relative_path(path, &self.workspace_root);

    if self.ignore_list.is_ignored(&relative) {
      trace!("Skipping: {} (matches ignore pattern)", relative);
      return Ok(HeaderOutcome::Skipped(SkipReason::Ignored));
    }

    let language_id = self
      .language_override
      .clone()
      .or_else(|| self.registry.identify(path));
    let Some(language_id) = language_id else {
      trace!("Skipping: {} (unknown language)", relative);
      return Ok(HeaderOutcome::Skipped(SkipReason::NoCommentSyntax));
    };

    if resolve_line_comment(self.registry.as_ref(), &language_id).is_none() {
      trace!("Skipping: {} (no line comment for language '{}')", relative, language_id);
      return Ok(HeaderOutcome::Skipped(SkipReason::NoCommentSyntax));
    }

    let content = FileIO::read_full_content(path)?;
    let mut document = TextDocument::new(language_id, content);
    let outcome = self.process_document(&relative, &document)?;

    if let HeaderOutcome::Updated(ref edit) = outcome {
      let original = document.text().to_string();
      document
        .apply_edit(edit)
        .with_context(|| format!("Failed to apply header edit to {}", path.display()))?;

      self.diff_manager.display_diff(path, &original, document.text())?;

      if self.check_only {
        verbose_log!("Outdated header: {}", relative);
      } else {
        FileIO::write_file(path, document.text())?;
        verbose_log!("Updated header: {}", relative);
      }
    }

    Ok(outcome)
  }

  /// Processes files in parallel and returns one report per file.
  ///
  /// A failing file is logged and reported as [`FileAction::Failed`]; the
  /// remaining files are still processed. Reports come back in input order.
  pub fn process_files(&self, files: &[PathBuf]) -> Vec<FileReport> {
    if files.is_empty() {
      debug!("No files to process");
      return Vec::new();
    }

    files
      .par_iter()
      .map(|path| {
        let display_path = PathBuf::from(relative_path(path, &self.workspace_root));
        match self.process_file(path) {
          Ok(outcome) => FileReport::from_outcome(display_path, &outcome),
          Err(e) => {
            warn!("Error processing {}: {:#}", path.display(), e);
            FileReport::failed(display_path, &e)
          }
        }
      })
      .collect()
  }

  /// Collects the files of the workspace that fall into some scope.
  pub fn collect_project_files(&self) -> Vec<PathBuf> {
    FileCollector::new(self.workspace_root.clone()).collect(&self.scopes, &self.ignore_list)
  }

  /// Processes every in-scope file of the workspace.
  pub fn process_project(&self) -> Vec<FileReport> {
    let files = self.collect_project_files();
    verbose_log!("Collected {} project files", files.len());
    self.process_files(&files)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;
  use crate::scope::Scope;
  use crate::templates::InlineTemplateSource;

  const TEMPLATE: &str = "<<<\nCopyright {{ year }} Example\n>>>";

  fn processor(root: &Path, check_only: bool) -> Processor {
    let scopes = ScopeSet::new(vec![
      Scope::new("src/", "src.tmpl").expect("valid scope"),
      Scope::new("", "other.tmpl").expect("valid scope"),
    ]);
    let source = InlineTemplateSource::new()
      .with_template("src.tmpl", TEMPLATE)
      .with_template("other.tmpl", "<<<\nOther {{ path }}\n>>>");

    Processor::new(ProcessorConfig {
      check_only,
      ignore_list: IgnoreList::new(vec!["^vendor/".to_string()]).expect("valid ignore list"),
      template_source: Box::new(source),
      ..ProcessorConfig::new(root.to_path_buf(), scopes, TemplateData::new("2025", "2025-01-01"))
    })
  }

  #[test]
  fn test_process_document_inserts_header() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let processor = processor(temp_dir.path(), false);
    let document = TextDocument::new("rust", "fn main() {}\n");

    let outcome = processor
      .process_document("src/main.rs", &document)
      .expect("pipeline should succeed");

    let edit = outcome.edit().expect("header should be inserted");
    assert!(edit.is_insert_only());
    assert_eq!(edit.insert_text, "// Copyright 2025 Example\n\n");
  }

  #[test]
  fn test_process_document_skip_order() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let processor = processor(temp_dir.path(), false);

    let css = TextDocument::new("css", "body {}\n");
    assert_eq!(
      processor.process_document("vendor/a.css", &css).expect("pipeline"),
      HeaderOutcome::Skipped(SkipReason::Ignored)
    );
    assert_eq!(
      processor.process_document("src/a.css", &css).expect("pipeline"),
      HeaderOutcome::Skipped(SkipReason::NoCommentSyntax)
    );
  }

  #[test]
  fn test_process_document_no_scope() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let scopes = ScopeSet::new(vec![Scope::new("src/", "src.tmpl").expect("valid scope")]);
    let processor = Processor::new(ProcessorConfig {
      template_source: Box::new(InlineTemplateSource::new().with_template("src.tmpl", TEMPLATE)),
      ..ProcessorConfig::new(temp_dir.path().to_path_buf(), scopes, TemplateData::new("2025", "2025-01-01"))
    });

    let document = TextDocument::new("python", "x = 1\n");
    assert_eq!(
      processor.process_document("tools/a.py", &document).expect("pipeline"),
      HeaderOutcome::Skipped(SkipReason::NoScope)
    );
  }

  #[test]
  fn test_process_document_uses_path_variable() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let processor = processor(temp_dir.path(), false);
    let document = TextDocument::new("python", "# Other tools/a.py\n\nx = 1\n");

    assert_eq!(
      processor.process_document("tools/a.py", &document).expect("pipeline"),
      HeaderOutcome::AlreadyCurrent
    );
  }

  #[test]
  fn test_process_file_writes_and_is_idempotent() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).expect("create src");
    let file = root.join("src/lib.rs");
    fs::write(&file, "// Copyright 2020 Example\npub fn f() {}\n").expect("write file");

    let processor = processor(root, false);
    let outcome = processor.process_file(&file).expect("process file");
    assert!(matches!(outcome, HeaderOutcome::Updated(_)));
    assert_eq!(
      fs::read_to_string(&file).expect("read file"),
      "// Copyright 2025 Example\npub fn f() {}\n"
    );

    let second = processor.process_file(&file).expect("process file");
    assert_eq!(second, HeaderOutcome::AlreadyCurrent);
  }

  #[test]
  fn test_process_file_check_only_leaves_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).expect("create src");
    let file = root.join("src/lib.rs");
    fs::write(&file, "pub fn f() {}\n").expect("write file");

    let processor = processor(root, true);
    let outcome = processor.process_file(&file).expect("process file");

    assert!(matches!(outcome, HeaderOutcome::Updated(_)));
    assert_eq!(fs::read_to_string(&file).expect("read file"), "pub fn f() {}\n");
  }

  #[test]
  fn test_process_files_reports_failures() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).expect("create src");
    fs::write(root.join("src/ok.rs"), "fn ok() {}\n").expect("write file");
    fs::write(root.join("src/bad.rs"), [0xff, 0xfe]).expect("write file");

    let processor = processor(root, false);
    let reports = processor.process_files(&[root.join("src/ok.rs"), root.join("src/bad.rs")]);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].action, FileAction::Added);
    assert_eq!(reports[1].action, FileAction::Failed);
    assert!(reports[1].error.is_some());
  }

  #[test]
  fn test_language_override() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).expect("create src");
    let file = root.join("src/script");
    fs::write(&file, "echo hi\n").expect("write file");

    let scopes = ScopeSet::new(vec![Scope::new("", "src.tmpl").expect("valid scope")]);
    let processor = Processor::new(ProcessorConfig {
      language_override: Some("shellscript".to_string()),
      template_source: Box::new(InlineTemplateSource::new().with_template("src.tmpl", TEMPLATE)),
      ..ProcessorConfig::new(root.to_path_buf(), scopes, TemplateData::new("2025", "2025-01-01"))
    });

    processor.process_file(&file).expect("process file");
    assert_eq!(
      fs::read_to_string(&file).expect("read file"),
      "# Copyright 2025 Example\n\necho hi\n"
    );
  }
}
