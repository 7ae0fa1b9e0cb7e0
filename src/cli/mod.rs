//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with one subcommand per entry point:
//! updating given files, updating the whole project, and scaffolding a
//! starter configuration.

mod common;
mod init;
mod project;
mod update;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
pub use common::CommonArgs;
pub use init::{InitArgs, run_init};
pub use project::{ProjectArgs, run_project};
pub use update::{UpdateArgs, run_update};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Write a starter .copyright.toml and .copyright.tmpl
  copyright-updater init

  # Update the header of a few files
  copyright-updater update src/main.rs src/lib.rs

  # Update every file covered by a scope
  copyright-updater project

  # Report outdated headers without touching files (exit 1 if any)
  copyright-updater project --check --show-diff

  # Treat an extensionless script as a shell script
  copyright-updater update --language shellscript bin/release
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Update the copyright header of the given files
  Update(UpdateArgs),
  /// Update the copyright header of every in-scope file in the workspace
  Project(ProjectArgs),
  /// Write a starter configuration and template to the workspace root
  Init(InitArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

