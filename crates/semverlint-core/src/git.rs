//! [`Repository`] over a git working copy.

use crate::errors::{Result, SemverLintError};
use crate::version::{CommitRef, Repository, Tag};
use git2::{ErrorCode, Object, Oid};
use std::path::Path;

/// A git repository opened from disk.
pub struct GitRepository {
    repo: git2::Repository,
}

impl GitRepository {
    /// Open the repository whose working copy (or `.git` dir) is `path`.
    ///
    /// Parent directories are not searched.
    ///
    /// # Errors
    ///
    /// `RepositoryOpen` when `path` is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::open(path).map_err(|e| SemverLintError::RepositoryOpen {
            message: format!("{}: {}", path.display(), e.message()),
        })?;
        tracing::debug!(path = %path.display(), "repository opened");
        Ok(Self { repo })
    }

    fn tag_target(&self, name: &str) -> std::result::Result<Oid, git2::Error> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
        reference
            .resolve()?
            .target()
            .ok_or_else(|| git2::Error::from_str("tag reference has no target"))
    }
}

fn commit_ref(oid: Oid) -> CommitRef {
    CommitRef(oid.to_string())
}

impl Repository for GitRepository {
    fn head(&self) -> Result<CommitRef> {
        let head = self.repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => SemverLintError::MissingHead,
            _ => SemverLintError::HeadLookup {
                message: e.message().to_string(),
            },
        })?;
        let commit = head
            .peel_to_commit()
            .map_err(|e| SemverLintError::HeadLookup {
                message: e.message().to_string(),
            })?;
        Ok(commit_ref(commit.id()))
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        let listing_err = |e: git2::Error| SemverLintError::TagListing {
            message: e.message().to_string(),
        };

        let names = self.repo.tag_names(None).map_err(listing_err)?;
        let mut tags = Vec::with_capacity(names.len());
        // Names that are not UTF-8 cannot be semver either.
        for name in names.iter().flatten() {
            let target = self.tag_target(name).map_err(listing_err)?;
            tags.push(Tag::new(name, target.to_string()));
        }
        Ok(tags)
    }

    /// Annotated tags are followed to the object they tag.
    fn commit_of(&self, tag: &Tag) -> Result<Option<CommitRef>> {
        let resolution_err = |e: git2::Error| SemverLintError::TagResolution {
            tag: tag.name.clone(),
            message: e.message().to_string(),
        };

        let oid = Oid::from_str(&tag.target).map_err(resolution_err)?;
        let mut object: Object<'_> = match self.repo.find_object(oid, None) {
            Ok(object) => object,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(resolution_err(e)),
        };
        let object = loop {
            match object.into_tag() {
                Ok(annotated) => object = annotated.target().map_err(resolution_err)?,
                Err(other) => break other,
            }
        };
        Ok(object.as_commit().map(|c| commit_ref(c.id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::discover_versions;
    use git2::Signature;
    use tempfile::TempDir;

    fn commit(repo: &git2::Repository, message: &str) -> Oid {
        let sig = Signature::now("semverlint", "semverlint@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn lightweight(repo: &git2::Repository, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    #[test]
    fn test_discovers_head_and_semver_tags() {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let first = commit(&repo, "first");
        lightweight(&repo, "v1.0.0", first);
        lightweight(&repo, "latest", first);
        let second = commit(&repo, "second");
        let sig = Signature::now("semverlint", "semverlint@example.com").unwrap();
        let object = repo.find_object(second, None).unwrap();
        repo.tag("v1.1.0", &object, &sig, "annotated", false).unwrap();
        let blob = repo.blob(b"not a commit").unwrap();
        lightweight(&repo, "v2.0.0", blob);
        let head = commit(&repo, "third");

        let versions = discover_versions(&GitRepository::open(dir.path()).unwrap()).unwrap();
        let found: Vec<(&str, String)> = versions
            .iter()
            .map(|v| (v.name.as_str(), v.commit.to_string()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("HEAD", head.to_string()),
                ("v1.0.0", first.to_string()),
                ("v1.1.0", second.to_string()),
            ]
        );
    }

    #[test]
    fn test_open_non_repository_fails() {
        let dir = TempDir::new().unwrap();
        let err = GitRepository::open(dir.path()).err().unwrap();
        assert!(matches!(err, SemverLintError::RepositoryOpen { .. }));
    }

    #[test]
    fn test_repository_without_commits_has_no_head() {
        let dir = TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let repo = GitRepository::open(dir.path()).unwrap();
        assert_eq!(repo.head(), Err(SemverLintError::MissingHead));
        assert_eq!(discover_versions(&repo), Err(SemverLintError::MissingHead));
    }

    #[test]
    fn test_unknown_tag_object_is_skipped() {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        commit(&repo, "first");
        let git = GitRepository::open(dir.path()).unwrap();
        let dangling = Tag::new("v9.0.0", "0123456789abcdef0123456789abcdef01234567");
        assert_eq!(git.commit_of(&dangling), Ok(None));
    }

    #[test]
    fn test_malformed_tag_target_is_resolution_error() {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        commit(&repo, "first");
        let git = GitRepository::open(dir.path()).unwrap();
        let err = git.commit_of(&Tag::new("v1.0.0", "zz")).unwrap_err();
        assert!(matches!(err, SemverLintError::TagResolution { ref tag, .. } if tag == "v1.0.0"));
    }
}
