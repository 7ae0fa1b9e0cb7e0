//! # Project Command
//!
//! Walks the workspace and updates every file that falls into a configured
//! scope.

use std::time::Instant;

use anyhow::Result;
use clap::Args;
use copyright_updater::config::DEFAULT_CONFIG_FILENAME;
use copyright_updater::output::print_start_message;
use copyright_updater::scope::ScopeSet;
use tracing::debug;

use super::CommonArgs;

/// Arguments for the project command
#[derive(Args, Debug)]
pub struct ProjectArgs {
  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run the project command with the given arguments
pub fn run_project(args: ProjectArgs) -> Result<()> {
  let common = &args.common;
  common.init_output();

  let session = common.open_session()?;
  let Some(ref config) = session.config else {
    anyhow::bail!(
      "No configuration found in {}. Run `copyright-updater init` to create {} or pass --config",
      session.workspace_root.display(),
      DEFAULT_CONFIG_FILENAME
    );
  };

  let scopes = ScopeSet::from_config(&config.scopes)?;
  debug!("Compiled {} scopes", scopes.len());

  let processor = common.build_processor(session, scopes, None)?;

  let start_time = Instant::now();
  let files = processor.collect_project_files();
  print_start_message(files.len(), common.check);

  let reports = processor.process_files(&files);
  common.finish(&reports, start_time.elapsed())
}
