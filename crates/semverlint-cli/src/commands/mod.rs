pub mod check;
pub mod diff;
pub mod versions;

use clap::ValueEnum;
use semverlint_core::{render_human_summary, ApiChanges};

/// What a command found, mapped to the process exit code by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Compatible,
    /// Breaking changes were found and not allowed
    Breaking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One `path: change` line per top-level change
    Text,
    /// The change tree as JSON
    Json,
    /// Markdown summary with a verdict line
    Markdown,
}

/// Print `changes` in `format` and decide the outcome.
pub fn report(
    changes: &ApiChanges,
    format: Format,
    allow_breaking: bool,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    match format {
        Format::Text => {
            for line in changes.render_lines() {
                println!("{}", line);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(changes)?),
        Format::Markdown => print!("{}", render_human_summary(changes)),
    }

    if changes.is_breaking() && !allow_breaking {
        tracing::info!(
            change_count = changes.change_count(),
            "breaking changes found"
        );
        Ok(Outcome::Breaking)
    } else {
        Ok(Outcome::Compatible)
    }
}
