//! Versions command
//!
//! Usage: semverlint versions --repo <PATH>
//!        semverlint versions <NAMES>...

use super::Outcome;
use clap::Args;
use semverlint_core::version::order_versions;
use semverlint_core::{discover_versions, GitRepository, Version};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Git repository to list HEAD and semver tags of, one `name commit` per line
    #[arg(long, conflicts_with = "names")]
    pub repo: Option<PathBuf>,

    /// Tag names; `HEAD` is kept, names that are not semantic versions are dropped
    #[arg(required_unless_present = "repo")]
    pub names: Vec<String>,
}

pub fn execute(args: VersionsArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    if let Some(path) = args.repo {
        let repo = GitRepository::open(&path)?;
        for version in discover_versions(&repo)? {
            println!("{} {}", version.name, version.commit);
        }
        return Ok(Outcome::Compatible);
    }

    let versions = order_versions(
        args.names
            .iter()
            .map(|name| Version::new(name.as_str(), name.as_str())),
    );
    for version in versions {
        println!("{}", version.name);
    }
    Ok(Outcome::Compatible)
}
