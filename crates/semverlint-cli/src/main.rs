//! semverlint CLI
//!
//! Command-line interface for comparing exported API snapshots

use clap::{Parser, Subcommand};
use semverlint_core::logging_facility::{init, Profile};

mod commands;

use commands::Outcome;

#[derive(Debug, Parser)]
#[command(name = "semverlint")]
#[command(about = "semverlint - Detect breaking API changes between versions", long_about = None)]
struct Cli {
    /// Emit JSON logs on stderr instead of human-readable ones
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two API snapshot files
    Diff(commands::diff::DiffArgs),
    /// List a repository's versions, or order given names (HEAD first, then ascending semver)
    Versions(commands::versions::VersionsArgs),
    /// Check a release against its predecessor in a snapshot directory
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Versions(args) => commands::versions::execute(args),
        Commands::Check(args) => commands::check::execute(args),
    };

    match result {
        Ok(Outcome::Compatible) => {}
        Ok(Outcome::Breaking) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
