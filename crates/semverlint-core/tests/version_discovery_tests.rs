//! Version discovery over an in-memory repository.

mod common;

use common::FakeRepository;
use semverlint_core::errors::{ExError, ExErrorKind, SemverLintError};
use semverlint_core::version::{discover_versions, CommitRef, HEAD};

fn names(repo: &FakeRepository) -> Vec<String> {
    discover_versions(repo)
        .unwrap()
        .into_iter()
        .map(|v| v.name)
        .collect()
}

#[test]
fn test_head_only_repository() {
    let repo = FakeRepository::new("h0");
    let versions = discover_versions(&repo).unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].name, HEAD);
    assert_eq!(versions[0].commit, CommitRef::from("h0"));
}

#[test]
fn test_tags_sorted_after_head() {
    let repo = FakeRepository::new("h0")
        .with_commit_tag("v1.10.0", "c3")
        .with_commit_tag("v0.9.1", "c1")
        .with_commit_tag("v1.2.0", "c2");
    assert_eq!(names(&repo), vec!["HEAD", "v0.9.1", "v1.2.0", "v1.10.0"]);
}

#[test]
fn test_non_semver_tags_are_skipped() {
    let repo = FakeRepository::new("h0")
        .with_commit_tag("latest", "c9")
        .with_commit_tag("v1.0.0", "c1")
        .with_commit_tag("release-2020", "c8");
    assert_eq!(names(&repo), vec!["HEAD", "v1.0.0"]);
}

#[test]
fn test_tags_not_pointing_to_commits_are_skipped() {
    let repo = FakeRepository::new("h0")
        .with_blob_tag("v2.0.0", "blob1")
        .with_commit_tag("v1.0.0", "c1");
    assert_eq!(names(&repo), vec!["HEAD", "v1.0.0"]);
}

#[test]
fn test_version_commit_is_resolved_commit() {
    let repo = FakeRepository::new("h0").with_commit_tag("v1.0.0", "c1");
    let versions = discover_versions(&repo).unwrap();
    assert_eq!(versions[1].commit, CommitRef::from("c1"));
}

#[test]
fn test_missing_head_is_fatal() {
    let mut repo = FakeRepository::new("h0").with_commit_tag("v1.0.0", "c1");
    repo.head = Err(SemverLintError::MissingHead);
    let err = discover_versions(&repo).unwrap_err();
    assert_eq!(err, SemverLintError::MissingHead);
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::MissingHead);
}

#[test]
fn test_tag_listing_failure_is_fatal() {
    let mut repo = FakeRepository::new("h0");
    repo.tags = Err(SemverLintError::TagListing {
        message: "refs unreadable".into(),
    });
    let err = discover_versions(&repo).unwrap_err();
    assert!(err.to_string().contains("unable to list tags"));
}

#[test]
fn test_tag_resolution_failure_is_distinct_from_skip() {
    let repo = FakeRepository::new("h0")
        .with_commit_tag("v1.0.0", "c1")
        .with_broken_tag("v1.1.0", "bad");
    let err = discover_versions(&repo).unwrap_err();
    match &err {
        SemverLintError::TagResolution { tag, .. } => assert_eq!(tag, "v1.1.0"),
        other => panic!("unexpected error: {:?}", other),
    }
    let ex: ExError = err.into();
    assert_eq!(ex.code(), "ERR_TAG_RESOLUTION");
    assert_eq!(ex.entity_id(), Some("v1.1.0"));
}
