//! # copyright-updater
//!
//! Keeps templated copyright headers at the top of source files up to date.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, Command, run_init, run_project, run_update};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  match cli.command {
    Command::Update(args) => run_update(args),
    Command::Project(args) => run_project(args),
    Command::Init(args) => run_init(args),
  }
}
