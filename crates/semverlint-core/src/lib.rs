//! semverlint core - API surface diffing and semver compliance checking
//!
//! This crate provides:
//! - The API model of one version's exported surface ([`model`])
//! - The type identity predicate used by every comparison
//! - The structural diff engine and its change tree ([`diff`])
//! - Breaking-change classification and Markdown summaries
//! - Version discovery and ordering over a repository port ([`version`]),
//!   with a git-backed implementation ([`git`])
//! - Snapshot loading at the introspection boundary ([`snapshot`])

pub mod diff;
pub mod errors;
pub mod git;
pub mod logging_facility;
pub mod model;
pub mod snapshot;
pub mod version;

#[doc(hidden)]
pub use semverlint_core_types;

// Re-export commonly used types
pub use diff::{diff, is_breaking, render_human_summary, ApiChanges, Change, DeclKind};
pub use errors::{ExError, ExErrorKind, Result, SemverLintError};
pub use git::GitRepository;
pub use model::{identical, Api, Package, Type};
pub use snapshot::{compare, load_snapshot, ApiSource, SnapshotDir};
pub use version::{discover_versions, sort_versions, Repository, Version, HEAD};
