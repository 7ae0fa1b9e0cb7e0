//! # copyright-updater
//!
//! A tool that keeps the copyright header at the top of source files in sync
//! with a per-scope template.
//!
//! The header of a file is the first run of lines, after any leading blank
//! lines, that start with the file's line-comment prefix. `copyright-updater`
//! renders the template of the first scope whose pattern matches the file's
//! workspace-relative path, prefixes each template line with the comment
//! marker, and replaces the header only when the text differs. Running it
//! twice never changes a file the second time.
//!
//! ## Features
//!
//! * Regex scopes mapping path prefixes to template files
//! * `{{ year }}`, `{{ date }}`, `{{ path }}`, `{{ file_name }}` and user
//!   variables in templates
//! * Ignore patterns inline, from the command line, or from ignore files
//! * Built-in line-comment table with per-project language overrides
//! * Check mode with diffs and JSON reports for CI
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use copyright_updater::processor::{Processor, ProcessorConfig};
//! use copyright_updater::scope::{Scope, ScopeSet};
//! use copyright_updater::templates::TemplateData;
//!
//! fn main() -> anyhow::Result<()> {
//!     let scopes = ScopeSet::new(vec![Scope::new("src/", ".copyright.tmpl")?]);
//!     let processor = Processor::new(ProcessorConfig::new(
//!         PathBuf::from("."),
//!         scopes,
//!         TemplateData::today(None),
//!     ));
//!
//!     for report in processor.process_project() {
//!         println!("{}: {:?}", report.path.display(), report.action);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Header detection, synthesis and edit planning
//! * [`processor`] - Applying the header pipeline to files on disk
//! * [`templates`] - Template sources and rendering
//! * [`scope`] / [`ignore`] - Which files get which template
//! * [`logging`] - Logging utilities for verbose output

pub mod config;
pub mod diff;
pub mod document;
pub mod header;
pub mod ignore;
pub mod language;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod scope;
pub mod templates;
pub mod workspace;
