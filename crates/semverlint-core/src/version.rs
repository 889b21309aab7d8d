//! Version discovery and ordering.
//!
//! A repository exposes HEAD and its tags through [`Repository`];
//! [`discover_versions`] turns that into the ordered list of comparable
//! versions: HEAD first, then every semver tag in ascending order.

use crate::errors::{Result, SemverLintError};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Name of the current-working-copy pseudo-version.
pub const HEAD: &str = "HEAD";

/// Opaque commit identifier (hash) as reported by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitRef(pub String);

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitRef {
    fn from(s: &str) -> Self {
        CommitRef(s.to_string())
    }
}

/// A point in the project's history that can be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,
    pub commit: CommitRef,
}

impl Version {
    pub fn new(name: impl Into<String>, commit: impl Into<CommitRef>) -> Self {
        Self {
            name: name.into(),
            commit: commit.into(),
        }
    }

    pub fn head(commit: impl Into<CommitRef>) -> Self {
        Self::new(HEAD, commit)
    }

    pub fn is_head(&self) -> bool {
        self.name == HEAD
    }

    /// Parsed semantic version, `None` for HEAD or non-semver names.
    pub fn semver(&self) -> Option<semver::Version> {
        parse_version(&self.name)
    }
}

/// A tag reference as listed by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Short tag name, e.g. `v1.2.0`
    pub name: String,
    /// Object the tag reference points at
    pub target: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// Version-control collaborator used by [`discover_versions`].
///
/// Implementations report failures with the matching [`SemverLintError`]
/// variant (`MissingHead`, `HeadLookup`, `TagListing`, `TagResolution`).
pub trait Repository {
    /// Commit currently checked out.
    fn head(&self) -> Result<CommitRef>;

    fn tags(&self) -> Result<Vec<Tag>>;

    /// Commit a tag points to, or `Ok(None)` when its target is not a commit.
    fn commit_of(&self, tag: &Tag) -> Result<Option<CommitRef>>;
}

/// Parse a tag name as a semantic version.
///
/// Accepts a leading `v` and a shortened `MAJOR` or `MAJOR.MINOR` core,
/// which is padded with zeros (`v1.2` is `1.2.0`).
pub fn parse_version(name: &str) -> Option<semver::Version> {
    let trimmed = name.strip_prefix(|c: char| c == 'v' || c == 'V').unwrap_or(name);
    if let Ok(version) = semver::Version::parse(trimmed) {
        return Some(version);
    }

    let core_end = trimmed
        .find(|c: char| c == '-' || c == '+')
        .unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(core_end);
    let parts: Vec<&str> = core.split('.').collect();
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if !numeric || parts.len() >= 3 {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    semver::Version::parse(&padded).ok()
}

/// Sort versions in place: HEAD first, then ascending semantic version.
///
/// Stable, so entries comparing equal keep their relative order.
pub fn sort_versions(versions: &mut [Version]) {
    versions.sort_by_cached_key(|v| (!v.is_head(), v.semver()));
}

/// Keep HEAD and semver-named entries, then sort them.
pub fn order_versions(versions: impl IntoIterator<Item = Version>) -> Vec<Version> {
    let mut kept: Vec<Version> = versions
        .into_iter()
        .filter(|v| v.is_head() || v.semver().is_some())
        .collect();
    sort_versions(&mut kept);
    kept
}

/// List the comparable versions of a repository.
///
/// HEAD is always included. Tags that do not point to a commit or whose
/// name is not a semantic version are skipped. Any other repository failure
/// aborts discovery.
pub fn discover_versions<R: Repository + ?Sized>(repo: &R) -> Result<Vec<Version>> {
    let start = Instant::now();
    log_op_start!("discover_versions");

    let result = collect_versions(repo);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(versions) => {
            log_op_end!(
                "discover_versions",
                duration_ms = duration_ms,
                version_count = versions.len()
            );
        }
        Err(err) => {
            log_op_error!("discover_versions", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn collect_versions<R: Repository + ?Sized>(repo: &R) -> Result<Vec<Version>> {
    let mut versions = vec![Version::head(repo.head()?)];

    for tag in repo.tags()? {
        let Some(commit) = repo.commit_of(&tag)? else {
            tracing::debug!(tag = %tag.name, "skipping tag not pointing to a commit");
            continue;
        };
        if parse_version(&tag.name).is_none() {
            tracing::debug!(tag = %tag.name, "skipping non-semver tag");
            continue;
        }
        versions.push(Version::new(tag.name, commit));
    }

    sort_versions(&mut versions);
    Ok(versions)
}

/// Find a version by name, returning a typed error naming it otherwise.
pub fn find_version<'a>(versions: &'a [Version], name: &str) -> Result<&'a Version> {
    versions
        .iter()
        .find(|v| v.name == name)
        .ok_or_else(|| SemverLintError::Introspection {
            version: name.to_string(),
            message: "unknown version".to_string(),
        })
}

/// The version a release at `name` is checked against.
///
/// For HEAD that is the newest tag; for a tag it is the tag just below it.
/// `versions` must already be in canonical order.
pub fn previous_version<'a>(versions: &'a [Version], name: &str) -> Option<&'a Version> {
    let tags: Vec<&Version> = versions.iter().filter(|v| !v.is_head()).collect();
    if name == HEAD {
        return tags.last().copied();
    }
    let pos = tags.iter().position(|v| v.name == name)?;
    pos.checked_sub(1).map(|i| tags[i])
}
