//! # Templates Module
//!
//! This module provides functionality for loading header templates, rendering
//! them with per-file data (like the copyright year or the file path), and
//! turning the rendered text into header content lines.
//!
//! The module includes:
//! - [`TemplateSource`] for resolving a scope's template reference to text
//! - [`FileTemplateSource`] which reads templates from the workspace
//! - [`TemplateData`] and [`TemplateContext`] for filling in `{{variable}}`
//!   placeholders
//! - [`RenderedTemplate`] for the delimiter-stripped header content
//!
//! A template is plain text whose first and last lines are delimiters; only
//! the lines in between become the header:
//!
//! ```text
//! ---
//! Copyright {{year}} {{author}}
//! SPDX-License-Identifier: MIT
//! ---
//! ```
//!
//! ## Example
//!
//! ```rust
//! use copyright_updater::templates::{InlineTemplateSource, TemplateData, render};
//!
//! # fn main() -> Result<(), copyright_updater::templates::TemplateError> {
//! let source = InlineTemplateSource::new().with_template("mit", "---\nCopyright {{year}}\n---");
//! let data = TemplateData::new("2025", "2025-01-01");
//!
//! let rendered = render(&source, "mit", &data.context("src/lib.rs"))?.expect("non-empty");
//! assert_eq!(rendered.lines(), ["Copyright 2025"]);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;
use tracing::trace;

use crate::verbose_log;

/// Errors raised while loading or rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The template file could not be read.
  #[error("Failed to read template file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// No template is registered under the reference.
  #[error("Unknown template '{0}'")]
  UnknownTemplate(String),

  /// The template uses a placeholder with no value.
  #[error("Unknown template variable '{name}' in '{reference}'")]
  UnknownVariable { reference: String, name: String },

  /// The template has fewer than the two delimiter lines.
  #[error("Template '{0}' must have an opening and a closing delimiter line")]
  MissingDelimiters(String),
}

/// Values shared by every file rendered during one run.
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
  /// Copyright year, usually the current year
  pub year: String,
  /// Current date formatted as `YYYY-MM-DD`
  pub date: String,
  /// User-defined variables from the configuration
  pub variables: BTreeMap<String, String>,
}

impl TemplateData {
  pub fn new(year: impl Into<String>, date: impl Into<String>) -> Self {
    Self {
      year: year.into(),
      date: date.into(),
      variables: BTreeMap::new(),
    }
  }

  /// Creates data for the current local date, with an optional year override.
  pub fn today(year_override: Option<String>) -> Self {
    use chrono::Datelike;

    let now = chrono::Local::now();
    let year = year_override.unwrap_or_else(|| now.year().to_string());
    Self::new(year, now.format("%Y-%m-%d").to_string())
  }

  pub fn with_variables(mut self, variables: BTreeMap<String, String>) -> Self {
    self.variables = variables;
    self
  }

  /// Binds the data to a workspace-relative path.
  pub fn context<'a>(&'a self, relative_path: &'a str) -> TemplateContext<'a> {
    TemplateContext {
      data: self,
      relative_path,
    }
  }
}

/// Rendering context for a single file.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
  data: &'a TemplateData,
  relative_path: &'a str,
}

impl TemplateContext<'_> {
  /// Looks up a placeholder value. Built-in names take precedence over
  /// user-defined variables.
  pub fn lookup(&self, name: &str) -> Option<&str> {
    match name {
      "year" => Some(&self.data.year),
      "date" => Some(&self.data.date),
      "path" => Some(self.relative_path),
      "file_name" => Some(
        self
          .relative_path
          .rsplit('/')
          .next()
          .unwrap_or(self.relative_path),
      ),
      _ => self.data.variables.get(name).map(String::as_str),
    }
  }
}

static PLACEHOLDER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_-]*)\s*\}\}").expect("placeholder regex must compile"));

/// Replaces every `{{name}}` placeholder in `template` using `context`.
pub fn substitute(reference: &str, template: &str, context: &TemplateContext<'_>) -> Result<String, TemplateError> {
  let mut rendered = String::with_capacity(template.len());
  let mut last = 0;

  for caps in PLACEHOLDER.captures_iter(template) {
    let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
      continue;
    };

    let value = context
      .lookup(name.as_str())
      .ok_or_else(|| TemplateError::UnknownVariable {
        reference: reference.to_string(),
        name: name.as_str().to_string(),
      })?;

    rendered.push_str(&template[last..whole.start()]);
    rendered.push_str(value);
    last = whole.end();
  }

  rendered.push_str(&template[last..]);
  Ok(rendered)
}

/// Resolves a scope's template reference to rendered text.
///
/// `Ok(None)` means the template evaluated to nothing and the file keeps
/// whatever header it has. Errors are reserved for missing or malformed
/// templates.
pub trait TemplateSource: Send + Sync {
  fn evaluate(&self, reference: &str, context: &TemplateContext<'_>) -> Result<Option<String>, TemplateError>;
}

/// Template source reading files relative to the workspace root.
///
/// Raw template text is cached per path, so a batch run reads each template
/// once.
pub struct FileTemplateSource {
  root: PathBuf,
  cache: Mutex<HashMap<PathBuf, Arc<str>>>,
}

impl FileTemplateSource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      cache: Mutex::new(HashMap::new()),
    }
  }

  fn load(&self, path: &Path) -> Result<Arc<str>, TemplateError> {
    if let Some(text) = self.cache.lock().expect("mutex poisoned").get(path) {
      trace!("Using cached template: {}", path.display());
      return Ok(Arc::clone(text));
    }

    verbose_log!("Loading template from: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| TemplateError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    // The file's final newline terminates the closing delimiter line.
    let trimmed = match content.strip_suffix('\n') {
      Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
      None => content.as_str(),
    };

    let text: Arc<str> = Arc::from(trimmed);
    let mut cache = self.cache.lock().expect("mutex poisoned");
    Ok(Arc::clone(cache.entry(path.to_path_buf()).or_insert(text)))
  }
}

impl TemplateSource for FileTemplateSource {
  fn evaluate(&self, reference: &str, context: &TemplateContext<'_>) -> Result<Option<String>, TemplateError> {
    let path = self.root.join(reference);
    let raw = self.load(&path)?;
    let rendered = substitute(reference, &raw, context)?;

    if rendered.trim().is_empty() {
      return Ok(None);
    }
    Ok(Some(rendered))
  }
}

/// Template source backed by in-memory strings.
#[derive(Debug, Clone, Default)]
pub struct InlineTemplateSource {
  templates: HashMap<String, String>,
}

impl InlineTemplateSource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_template(mut self, reference: impl Into<String>, text: impl Into<String>) -> Self {
    self.templates.insert(reference.into(), text.into());
    self
  }
}

impl TemplateSource for InlineTemplateSource {
  fn evaluate(&self, reference: &str, context: &TemplateContext<'_>) -> Result<Option<String>, TemplateError> {
    let raw = self
      .templates
      .get(reference)
      .ok_or_else(|| TemplateError::UnknownTemplate(reference.to_string()))?;
    let rendered = substitute(reference, raw, context)?;

    if rendered.trim().is_empty() {
      return Ok(None);
    }
    Ok(Some(rendered))
  }
}

/// Header content lines of a rendered template, delimiters removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
  lines: Vec<String>,
}

impl RenderedTemplate {
  /// Splits rendered text on `\n` and drops the first and last line.
  ///
  /// Returns `Ok(None)` when there is nothing between the delimiters, and an
  /// error when the text is a single line.
  pub fn from_text(text: &str) -> Result<Option<Self>, TemplateError> {
    let all: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    if all.len() < 2 {
      return Err(TemplateError::MissingDelimiters(first_line(text)));
    }

    let interior = &all[1..all.len() - 1];
    // A bare delimiter pair would insert one blank comment line on every run.
    if interior.is_empty() {
      return Ok(None);
    }

    Ok(Some(Self {
      lines: interior.iter().map(|l| (*l).to_string()).collect(),
    }))
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}

fn first_line(text: &str) -> String {
  text.lines().next().unwrap_or_default().to_string()
}

/// Evaluates `reference` through `source` and strips the delimiters.
pub fn render(
  source: &dyn TemplateSource,
  reference: &str,
  context: &TemplateContext<'_>,
) -> Result<Option<RenderedTemplate>, TemplateError> {
  let Some(text) = source.evaluate(reference, context)? else {
    return Ok(None);
  };

  RenderedTemplate::from_text(&text).map_err(|e| match e {
    TemplateError::MissingDelimiters(_) => TemplateError::MissingDelimiters(reference.to_string()),
    other => other,
  })
}
