//! Diff command
//!
//! Usage: semverlint diff <PREV> <CURRENT> [--format text|json|markdown] [--allow-breaking]

use super::{report, Format, Outcome};
use clap::Args;
use semverlint_core::{diff, load_snapshot};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot of the previous version
    pub prev: PathBuf,

    /// Snapshot of the current version
    pub current: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Exit successfully even when breaking changes are found
    #[arg(long)]
    pub allow_breaking: bool,
}

pub fn execute(args: DiffArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let prev = load_snapshot(&args.prev)?;
    let current = load_snapshot(&args.current)?;

    let changes = diff(&prev, &current);
    report(&changes, args.format, args.allow_breaking)
}
