//! Human-readable Markdown summary of an [`ApiChanges`].
//!
//! Output is deterministic: it follows the order of the change tree exactly.

use crate::diff::change::ApiChanges;

/// Render an [`ApiChanges`] as a Markdown report.
///
/// The first section states the verdict. Every package with at least one
/// change gets its own section with one bullet per top-level change;
/// breaking bullets are prefixed with `[BREAKING]`.
pub fn render_human_summary(changes: &ApiChanges) -> String {
    let mut out = String::new();

    out.push_str("# API Diff Summary\n\n");

    let verdict = if changes.is_breaking() {
        "Breaking"
    } else if changes.is_empty() {
        "No changes"
    } else {
        "Compatible"
    };
    out.push_str(&format!("**Verdict:** {}\n", verdict));

    let breaking = changes.breaking_changes().count();
    out.push_str(&format!(
        "**Changes:** {} ({} breaking)\n\n",
        changes.change_count(),
        breaking
    ));

    if changes.is_empty() {
        out.push_str("_No API changes detected._\n");
        return out;
    }

    for pkg in changes.packages.iter().filter(|p| !p.is_empty()) {
        out.push_str(&format!("## {} (`{}`)\n\n", pkg.name, pkg.path));
        for change in &pkg.changes {
            if change.is_breaking() {
                out.push_str(&format!("- [BREAKING] {}\n", change));
            } else {
                out.push_str(&format!("- {}\n", change));
            }
        }
        out.push('\n');
    }

    out
}
