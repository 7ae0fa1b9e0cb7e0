//! # Header Module
//!
//! This module contains the header detection-and-rewrite engine. Given a
//! document, the line-comment prefix of its language and a rendered template,
//! it locates the current header and plans the smallest edit that makes the
//! header match the template.
//!
//! The module is organized into several submodules:
//! - [`region`] - Header region detection
//! - [`synthesizer`] - Comment-prefixed header text synthesis
//! - [`planner`] - Comparison against the current header and edit planning
//!
//! Everything here is a pure function of its inputs; the host decides when
//! and how to apply the resulting [`EditDescriptor`].
//!
//! ## Example
//!
//! ```rust
//! use copyright_updater::document::TextDocument;
//! use copyright_updater::header::{HeaderOutcome, rewrite_header};
//! use copyright_updater::templates::RenderedTemplate;
//!
//! let template = RenderedTemplate::from_text("<<<\nCopyright 2025 Example\n>>>")
//!   .expect("template has delimiters")
//!   .expect("template has content");
//! let mut document = TextDocument::new("python", "print('hi')\n");
//!
//! if let HeaderOutcome::Updated(edit) = rewrite_header(&document, Some("#"), Some(&template)) {
//!   document.apply_edit(&edit).expect("edit applies");
//! }
//!
//! assert_eq!(document.text(), "# Copyright 2025 Example\n\nprint('hi')\n");
//! ```

pub mod planner;
pub mod region;
pub mod synthesizer;

use std::fmt;

pub use planner::{EditDescriptor, plan};
pub use region::{HeaderRegion, detect};
pub use synthesizer::synthesize;

use crate::document::Document;
use crate::templates::RenderedTemplate;

/// Why a document was left alone without being inspected further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The path matches the ignore list.
  Ignored,
  /// No scope matches the path.
  NoScope,
  /// The language has no known line-comment syntax.
  NoCommentSyntax,
  /// The template rendered to nothing.
  EmptyTemplate,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::Ignored => write!(f, "ignored path"),
      SkipReason::NoScope => write!(f, "no matching scope"),
      SkipReason::NoCommentSyntax => write!(f, "no line-comment syntax for language"),
      SkipReason::EmptyTemplate => write!(f, "template rendered empty"),
    }
  }
}

/// Terminal outcome of running the header pipeline on one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOutcome {
  /// The header differs from the template; applying the edit fixes it.
  Updated(EditDescriptor),
  /// The header already matches the template.
  AlreadyCurrent,
  /// The document was not eligible for a header.
  Skipped(SkipReason),
}

impl HeaderOutcome {
  /// The planned edit, if any.
  pub const fn edit(&self) -> Option<&EditDescriptor> {
    match self {
      HeaderOutcome::Updated(edit) => Some(edit),
      _ => None,
    }
  }
}

/// Runs detect, synthesize and plan for a single document.
///
/// An absent `prefix` or `template` short-circuits to a skip before the
/// document is read.
pub fn rewrite_header<D: Document + ?Sized>(
  document: &D,
  prefix: Option<&str>,
  template: Option<&RenderedTemplate>,
) -> HeaderOutcome {
  let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
    return HeaderOutcome::Skipped(SkipReason::NoCommentSyntax);
  };
  let Some(template) = template else {
    return HeaderOutcome::Skipped(SkipReason::EmptyTemplate);
  };

  let region = detect(document, prefix);
  let text = synthesize(template.lines(), prefix, region.is_empty());

  match plan(document, region, text) {
    Some(edit) => HeaderOutcome::Updated(edit),
    None => HeaderOutcome::AlreadyCurrent,
  }
}
