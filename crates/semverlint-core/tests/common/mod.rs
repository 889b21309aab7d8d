use semverlint_core::errors::{Result, SemverLintError};
use semverlint_core::model::{Api, Package, Type};
use semverlint_core::version::{CommitRef, Repository, Tag};
use std::collections::{HashMap, HashSet};

#[allow(dead_code)]
pub fn int() -> Type {
    Type::basic("int")
}

#[allow(dead_code)]
pub fn string() -> Type {
    Type::basic("string")
}

/// Single-package snapshot at `example.com/lib`.
#[allow(dead_code)]
pub fn single(pkg: Package) -> Api {
    Api::new(vec![pkg])
}

#[allow(dead_code)]
pub fn lib() -> Package {
    Package::new("lib", "example.com/lib")
}

/// Rendered top-level changes of the only package in a diff.
#[allow(dead_code)]
pub fn rendered(changes: &semverlint_core::ApiChanges) -> Vec<String> {
    changes
        .packages
        .iter()
        .flat_map(|p| p.changes.iter().map(ToString::to_string))
        .collect()
}

/// In-memory repository for version discovery tests.
///
/// Tag targets listed in `commits` resolve to that commit; targets in
/// `broken` fail resolution; anything else is a non-commit object.
#[allow(dead_code)]
pub struct FakeRepository {
    pub head: std::result::Result<CommitRef, SemverLintError>,
    pub tags: std::result::Result<Vec<Tag>, SemverLintError>,
    pub commits: HashMap<String, CommitRef>,
    pub broken: HashSet<String>,
}

#[allow(dead_code)]
impl FakeRepository {
    pub fn new(head: &str) -> Self {
        Self {
            head: Ok(CommitRef::from(head)),
            tags: Ok(Vec::new()),
            commits: HashMap::new(),
            broken: HashSet::new(),
        }
    }

    /// Add a tag whose target is a commit of the same id.
    pub fn with_commit_tag(mut self, name: &str, commit: &str) -> Self {
        self.push_tag(name, commit);
        self.commits
            .insert(commit.to_string(), CommitRef::from(commit));
        self
    }

    /// Add a tag pointing at something that is not a commit.
    pub fn with_blob_tag(mut self, name: &str, target: &str) -> Self {
        self.push_tag(name, target);
        self
    }

    pub fn with_broken_tag(mut self, name: &str, target: &str) -> Self {
        self.push_tag(name, target);
        self.broken.insert(target.to_string());
        self
    }

    fn push_tag(&mut self, name: &str, target: &str) {
        if let Ok(tags) = self.tags.as_mut() {
            tags.push(Tag::new(name, target));
        }
    }
}

impl Repository for FakeRepository {
    fn head(&self) -> Result<CommitRef> {
        self.head.clone()
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        self.tags.clone()
    }

    fn commit_of(&self, tag: &Tag) -> Result<Option<CommitRef>> {
        if self.broken.contains(&tag.target) {
            return Err(SemverLintError::TagResolution {
                tag: tag.name.clone(),
                message: "object store corrupted".to_string(),
            });
        }
        Ok(self.commits.get(&tag.target).cloned())
    }
}
