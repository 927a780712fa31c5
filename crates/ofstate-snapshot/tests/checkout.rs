//! Checking out snapshots against a fake version control backend.

mod common;

use common::{Fixture, ADDON_SHA, OF_SHA};
use ofstate_snapshot::SnapshotError;

const NEWER: &str = "9999999999999999999999999999999999999999";

#[tokio::test]
async fn test_checkout_without_metadata() {
    let fixture = Fixture::new();
    let err = fixture.manager().await.checkout("latest").await.unwrap_err();
    assert!(matches!(err, SnapshotError::MetadataNotFound(_)));
    assert!(err.to_string().starts_with("Could not open file: "));
}

#[tokio::test]
async fn test_checkout_unknown_entry() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();

    let err = manager.checkout("some_name").await.unwrap_err();
    assert_eq!(err.to_string(), "Snapshot entry some_name does not exist.");
    assert!(fixture.vcs.switches().is_empty());
}

#[tokio::test]
async fn test_checkout_round_trip_keeps_commits() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();

    let report = manager.checkout("latest").await.unwrap();

    assert_eq!(fixture.vcs.head(fixture.of_dir()).unwrap(), OF_SHA);
    assert_eq!(
        fixture.vcs.head(fixture.addon_dir("ofxSomeAddon")).unwrap(),
        ADDON_SHA
    );
    assert_eq!(report.skipped, vec!["ofxNonGitAddon"]);
    let names: Vec<_> = report.switched.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["OF", "ofxSomeAddon"]);
}

#[tokio::test]
async fn test_checkout_restores_recorded_commits() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("snapshot-1", "", false).await.unwrap();

    fixture.vcs.set_head(fixture.of_dir(), NEWER);
    fixture.vcs.set_head(fixture.addon_dir("ofxSomeAddon"), NEWER);

    manager.checkout("snapshot-1").await.unwrap();
    assert_eq!(fixture.vcs.head(fixture.of_dir()).unwrap(), OF_SHA);
    assert_eq!(
        fixture.vcs.head(fixture.addon_dir("ofxSomeAddon")).unwrap(),
        ADDON_SHA
    );
}

#[tokio::test]
async fn test_checkout_prefers_branch_names() {
    let fixture = Fixture::new();
    let vcs = fixture
        .vcs
        .clone()
        .with_branch(fixture.of_dir(), "old", OF_SHA)
        .with_branch(fixture.of_dir(), "develop", NEWER)
        .with_branch(fixture.of_dir(), "master", OF_SHA);
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();

    let report = manager.checkout("latest").await.unwrap();

    assert_eq!(vcs.switches(), vec!["master".to_string(), ADDON_SHA.to_string()]);
    assert_eq!(report.switched[0].refname, "master");
    assert_eq!(report.switched[1].refname, ADDON_SHA);
}

#[tokio::test]
async fn test_checkout_validates_everything_before_switching() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();
    fixture.vcs.set_dirty(fixture.addon_dir("ofxSomeAddon"), true);

    let err = manager.checkout("latest").await.unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::UncommittedChanges { ref name } if name == "ofxSomeAddon"
    ));
    assert!(fixture.vcs.switches().is_empty());
}

#[tokio::test]
async fn test_checkout_addon_no_longer_a_repository() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();
    fixture.vcs.remove_repo(fixture.addon_dir("ofxSomeAddon"));

    let err = manager.checkout("latest").await.unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::NotARepository { ref name, .. } if name == "ofxSomeAddon"
    ));
    assert!(fixture.vcs.switches().is_empty());
}

#[tokio::test]
async fn test_checkout_framework_invalid() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();
    fixture.vcs.remove_repo(fixture.of_dir());

    let err = manager.checkout("latest").await.unwrap_err();
    assert!(matches!(err, SnapshotError::NotARepository { ref name, .. } if name == "OF"));
}

#[tokio::test]
async fn test_checkout_switch_failure_keeps_earlier_switches() {
    let fixture = Fixture::new();
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();
    fixture.vcs.set_head(fixture.of_dir(), NEWER);
    fixture.vcs.fail_switch(fixture.addon_dir("ofxSomeAddon"));

    let err = manager.checkout("latest").await.unwrap_err();
    assert!(matches!(err, SnapshotError::SwitchFailed { ref name, .. } if name == "ofxSomeAddon"));
    assert_eq!(fixture.vcs.head(fixture.of_dir()).unwrap(), OF_SHA);
}

#[tokio::test]
async fn test_checkout_without_non_git_addons_skips_nothing() {
    let fixture = Fixture::with_addons(&["ofxSomeAddon"]);
    let manager = fixture.manager().await;
    manager.record("latest", "", false).await.unwrap();

    let report = manager.checkout("latest").await.unwrap();
    assert!(report.skipped.is_empty());
}
