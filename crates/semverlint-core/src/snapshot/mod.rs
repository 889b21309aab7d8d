//! Snapshot access: the boundary to the source introspector.
//!
//! The introspector itself lives outside this crate. It hands over each
//! version's [`Api`](crate::model::Api) either directly through
//! [`ApiSource`] or as a JSON file read with [`load_snapshot`].

pub mod source;

pub use source::{compare, load_snapshot, write_snapshot, ApiSource, SnapshotDir};
