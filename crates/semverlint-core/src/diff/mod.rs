//! API diff engine.
//!
//! Compares two API snapshots and produces a deterministic change tree with
//! a breaking / non-breaking classification for every node.
//!
//! ## Entry point
//!
//! ```
//! use semverlint_core::diff::{diff, render_human_summary};
//! use semverlint_core::model::{Api, Func, Package};
//!
//! let prev = Api::new(vec![Package::new("a", "example.com/a").with_func(Func::new("F"))]);
//! let current = Api::new(vec![Package::new("a", "example.com/a")]);
//! let changes = diff(&prev, &current);
//! assert!(changes.is_breaking());
//! let summary = render_human_summary(&changes);
//! assert!(summary.contains("function F: was removed"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: packages by path, categories in a fixed order, names
//!   ascending within a category. Identical inputs render byte-identically.
//! - **Purity**: name indices are local to each call; concurrent calls share
//!   nothing.
//! - **Removal short-circuit**: a removed declaration is reported as removed
//!   and never compared further.

pub mod change;
pub mod engine;
pub mod human_summary;
mod structural;

pub use change::{is_breaking, ApiChanges, Change, DeclKind, PackageChanges};
pub use engine::{diff, package_diff};
pub use human_summary::render_human_summary;
