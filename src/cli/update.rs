//! # Update Command
//!
//! Updates the header of explicitly named files. Without a config file a
//! single catch-all scope pointing at `.copyright.tmpl` is used.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use copyright_updater::output::print_start_message;
use copyright_updater::scope::ScopeSet;
use copyright_updater::verbose_log;

use super::CommonArgs;

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
  /// Files to update
  #[arg(required = true, value_name = "FILES")]
  pub files: Vec<PathBuf>,

  /// Language id to use instead of detecting it from the file name
  #[arg(long, value_name = "ID")]
  pub language: Option<String>,

  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run the update command with the given arguments
pub fn run_update(args: UpdateArgs) -> Result<()> {
  let common = &args.common;
  common.init_output();

  let session = common.open_session()?;
  let scopes = match session.config {
    Some(ref config) => ScopeSet::from_config(&config.scopes)?,
    None => {
      verbose_log!("No config found, using the workspace template for every file");
      ScopeSet::fallback()
    }
  };

  let processor = common.build_processor(session, scopes, args.language.clone())?;
  let files = super::common::absolutize_all(&args.files)?;

  print_start_message(files.len(), common.check);

  let start_time = Instant::now();
  let reports = processor.process_files(&files);
  common.finish(&reports, start_time.elapsed())
}
