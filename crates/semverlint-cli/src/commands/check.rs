//! Check command
//!
//! Usage: semverlint check --snapshots <DIR> [--from <V>] [--to <V>]
//!
//! Without `--to` the newest snapshot is checked (HEAD when present); without
//! `--from` it is compared with the version just before it.

use super::{report, Format, Outcome};
use clap::Args;
use semverlint_core::version::{find_version, previous_version};
use semverlint_core::{compare, SnapshotDir};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Directory holding `<version>.json` snapshots
    #[arg(long)]
    pub snapshots: PathBuf,

    /// Baseline version
    #[arg(long)]
    pub from: Option<String>,

    /// Version to check
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Exit successfully even when breaking changes are found
    #[arg(long)]
    pub allow_breaking: bool,
}

pub fn execute(args: CheckArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let source = SnapshotDir::new(&args.snapshots);
    let versions = source.versions()?;

    let to = match args.to.as_deref() {
        Some(name) => find_version(&versions, name)?,
        None => versions
            .iter()
            .find(|v| v.is_head())
            .or_else(|| versions.last())
            .ok_or_else(|| format!("No snapshots found in {}", args.snapshots.display()))?,
    };
    let from = match args.from.as_deref() {
        Some(name) => find_version(&versions, name)?,
        None => previous_version(&versions, &to.name)
            .ok_or_else(|| format!("No version before {} to compare with", to.name))?,
    };

    tracing::debug!(from = %from.name, to = %to.name, "checking snapshots");
    let changes = compare(&source, from, to)?;
    report(&changes, args.format, args.allow_breaking)
}
