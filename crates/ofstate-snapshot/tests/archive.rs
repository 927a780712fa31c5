//! Archiving snapshots against a fake version control backend.

mod common;

use common::{Fixture, ADDON_SHA, OF_SHA};
use ofstate_snapshot::{ArchiveStatus, SnapshotError};
use ofstate_test_utils::VcsCall;

#[tokio::test]
async fn test_archive_bootstraps_missing_metadata() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;

    let report = manager.archive("latest").await.unwrap();

    assert!(fixture.tree.file_exists("mockProject/metadata.json"));
    assert_eq!(report.snapshot, "latest");
    assert_eq!(report.files.len(), 3);
    assert_eq!(report.created(), 3);
    assert!(report.description_file.is_none());

    assert_eq!(
        fixture.tree.list_files("mockProject/mockProject_archive"),
        vec![
            "mockProject_latest_OF_1111111.tar.gz",
            "mockProject_latest_ofxNonGitAddon_non-git.tar.gz",
            "mockProject_latest_ofxSomeAddon_2222222.tar.gz",
        ]
    );
}

#[tokio::test]
async fn test_archive_bootstraps_missing_entry_once() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("other", "", false).await.unwrap();

    manager.archive("snapshot-1").await.unwrap();

    let metadata = manager.store().load_existing().await.unwrap();
    let names: Vec<_> = metadata.snapshots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["other", "snapshot-1"]);
}

#[tokio::test]
async fn test_archive_bootstrap_failure_does_not_retry() {
    let fixture = Fixture::new();
    fixture.vcs.set_dirty(fixture.of_dir(), true);

    let err = fixture.manager().await.archive("latest").await.unwrap_err();
    assert!(matches!(err, SnapshotError::UncommittedChanges { .. }));
    assert!(!fixture.tree.file_exists("mockProject/metadata.json"));
    assert_eq!(fixture.vcs.export_count(), 0);
}

#[tokio::test]
async fn test_archive_is_idempotent() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;

    manager.archive("latest").await.unwrap();
    let first = fixture
        .tree
        .read_file("mockProject/mockProject_archive/mockProject_latest_OF_1111111.tar.gz");

    let report = manager.archive("latest").await.unwrap();
    assert_eq!(report.created(), 0);
    assert!(report
        .files
        .iter()
        .all(|f| f.status == ArchiveStatus::Skipped));
    assert_eq!(fixture.vcs.export_count(), 2);
    assert_eq!(
        fixture
            .tree
            .read_file("mockProject/mockProject_archive/mockProject_latest_OF_1111111.tar.gz"),
        first
    );
}

#[tokio::test]
async fn test_archive_exports_recorded_commits() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();

    // Moving HEAD afterwards must not change what gets archived.
    fixture.vcs.set_head(fixture.of_dir(), "ffffffffffffffffffffffffffffffffffffffff");
    manager.archive("latest").await.unwrap();

    let exports: Vec<(String, String)> = fixture
        .vcs
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            VcsCall::Export { commit, prefix, .. } => Some((prefix, commit)),
            VcsCall::Switch { .. } => None,
        })
        .collect();
    assert_eq!(
        exports,
        vec![
            ("mockOF".to_string(), OF_SHA.to_string()),
            ("ofxSomeAddon".to_string(), ADDON_SHA.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_archive_writes_description_file() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("release", "Show build", false).await.unwrap();

    let report = manager.archive("release").await.unwrap();

    let path = report.description_file.unwrap();
    assert!(path.ends_with("mockProject_release_description.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "Show build");
}

#[tokio::test]
async fn test_archive_export_failure_is_reported() {
    let fixture = Fixture::new();
    fixture.vcs.fail_export(fixture.addon_dir("ofxSomeAddon"));

    let err = fixture.manager().await.archive("latest").await.unwrap_err();
    assert!(matches!(err, SnapshotError::ArchiveFailed { ref name, .. } if name == "ofxSomeAddon"));
    assert!(!fixture.tree.file_exists(
        "mockProject/mockProject_archive/mockProject_latest_ofxSomeAddon_2222222.tar.gz"
    ));
}
