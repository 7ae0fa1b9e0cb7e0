//! # Init Command
//!
//! Writes a starter `.copyright.toml` and `.copyright.tmpl` so a project can
//! run `copyright-updater project` right away.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use copyright_updater::config::{DEFAULT_CONFIG_FILENAME, DEFAULT_TEMPLATE_FILENAME};
use copyright_updater::info_log;
use copyright_updater::logging::{ColorMode, set_quiet};
use copyright_updater::workspace::resolve_workspace;

const STARTER_CONFIG: &str = r#"# Regular expressions of workspace-relative paths to leave alone.
ignore = ["^target/", "^node_modules/"]

[variables]
author = "Your Name"

# Scopes are tried in order; the first pattern matching the
# workspace-relative path picks the template.
[[scopes]]
pattern = ""
template = ".copyright.tmpl"
"#;

const STARTER_TEMPLATE: &str = "<<<
Copyright {{ year }} {{ author }}
Use of this source code is governed by the MIT license.
>>>
";

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
  /// Directory to write the files to (default: the workspace root)
  #[arg(long, value_name = "DIR")]
  pub root: Option<PathBuf>,

  /// Overwrite existing files
  #[arg(long)]
  pub force: bool,

  /// Suppress all output except errors
  #[arg(short, long)]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(long, value_name = "WHEN", default_value_t = ColorMode::Auto, value_enum)]
  pub colors: ColorMode,
}

/// Run the init command with the given arguments
pub fn run_init(args: InitArgs) -> Result<()> {
  if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let workspace = resolve_workspace(args.root.as_deref())?;
  let root = workspace.root();

  let config_path = root.join(DEFAULT_CONFIG_FILENAME);
  let template_path = root.join(DEFAULT_TEMPLATE_FILENAME);

  if !args.force {
    for path in [&config_path, &template_path] {
      if path.exists() {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
      }
    }
  }

  write_starter(&config_path, STARTER_CONFIG)?;
  write_starter(&template_path, STARTER_TEMPLATE)?;

  info_log!(
    "Wrote {} and {}. Edit them, then run `copyright-updater project`.",
    config_path.display(),
    template_path.display()
  );
  Ok(())
}

fn write_starter(path: &Path, content: &str) -> Result<()> {
  fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
