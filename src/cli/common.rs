//! Arguments and setup shared by the `update` and `project` commands.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use copyright_updater::config::{Config, load_config};
use copyright_updater::diff::DiffManager;
use copyright_updater::ignore::IgnoreList;
use copyright_updater::info_log;
use copyright_updater::language::create_registry;
use copyright_updater::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use copyright_updater::output::print_results;
use copyright_updater::processor::{Processor, ProcessorConfig};
use copyright_updater::report::{FileReport, ProcessingSummary, write_json_report};
use copyright_updater::scope::ScopeSet;
use copyright_updater::templates::TemplateData;
use copyright_updater::workspace::resolve_workspace;
use tracing::debug;

/// Flags accepted by every processing command
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
  /// Workspace root (default: nearest directory with a config file or .git)
  #[arg(long, value_name = "DIR")]
  pub root: Option<PathBuf>,

  /// Path to config file (default: .copyright.toml or .vscode/copyright.json
  /// in the workspace root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Report outdated headers without modifying files; exit 1 if any
  #[arg(long)]
  pub check: bool,

  /// Show a diff of each header change
  #[arg(long)]
  pub show_diff: bool,

  /// Save diffs of all header changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Value of the `year` template variable (default: current year)
  #[arg(long)]
  pub year: Option<String>,

  /// Regex of workspace-relative paths to skip (repeatable)
  #[arg(long, short = 'i', value_name = "REGEX")]
  pub ignore: Vec<String>,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Workspace root and configuration for one run.
pub struct Session {
  pub workspace_root: PathBuf,
  pub config: Option<Config>,
}

impl CommonArgs {
  /// Installs logging and color settings.
  pub fn init_output(&self) {
    init_tracing(self.quiet, self.verbose);

    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();
  }

  /// Resolves the workspace root and loads its configuration.
  pub fn open_session(&self) -> Result<Session> {
    let workspace = resolve_workspace(self.root.as_deref())?;
    let workspace_root = workspace.into_root();
    debug!("Using workspace root: {}", workspace_root.display());

    let config = load_config(self.config.as_deref(), &workspace_root, self.no_config)?;
    Ok(Session { workspace_root, config })
  }

  /// Builds the processor for a session.
  pub fn build_processor(
    &self,
    session: Session,
    scopes: ScopeSet,
    language_override: Option<String>,
  ) -> Result<Processor> {
    let Session { workspace_root, config } = session;
    let config = config.unwrap_or_default();

    let mut ignore_list = IgnoreList::new(config.ignore)?;
    for file in &config.ignore_files {
      ignore_list
        .load_ignore_file(&workspace_root.join(file))
        .with_context(|| format!("Failed to load ignore file '{file}' listed in config"))?;
    }
    ignore_list.extend(self.ignore.iter().cloned())?;

    let diff_manager = DiffManager::new(self.show_diff, self.save_diff.clone());
    diff_manager.init()?;

    let template_data = TemplateData::today(self.year.clone()).with_variables(config.variables);

    Ok(Processor::new(ProcessorConfig {
      check_only: self.check,
      language_override,
      ignore_list,
      registry: create_registry(Some(config.languages)),
      diff_manager: Some(diff_manager),
      ..ProcessorConfig::new(workspace_root, scopes, template_data)
    }))
  }

  /// Prints results, writes the JSON report and exits with status 1 when
  /// the run needs attention.
  pub fn finish(&self, reports: &[FileReport], elapsed: Duration) -> Result<()> {
    let summary = ProcessingSummary::from_reports(reports, elapsed);

    print_results(reports, &summary, self.check);

    if let Some(ref output_path) = self.report_json {
      write_json_report(output_path, reports, &summary, self.check)?;
      info_log!("Generated JSON report at {}", output_path.display());
    }

    if summary.failed > 0 || (self.check && summary.changed() > 0) {
      process::exit(1);
    }

    Ok(())
  }
}

/// Resolves command-line file arguments against the current directory.
pub fn absolutize_all(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  Ok(
    files
      .iter()
      .map(|file| copyright_updater::processor::absolutize_path(file, &current_dir))
      .collect(),
  )
}
