//! `GitCli` against real repositories. Skipped when git is not installed.

use ofstate_snapshot::{GitCli, VersionControl};
use ofstate_test_utils::{git_available, GitRepo};
use tempfile::TempDir;

#[tokio::test]
async fn test_plain_directory_is_not_a_repo() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    assert!(!GitCli::new().is_repo(dir.path()).await.unwrap());
}

#[tokio::test]
async fn test_repository_root_is_a_repo() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let repo = GitRepo::init(dir.path().join("of"));
    repo.write("README.md", "of\n");
    repo.commit_all("initial");

    let git = GitCli::new();
    assert!(git.is_repo(repo.path()).await.unwrap());
    assert!(!git.has_uncommitted_changes(repo.path()).await.unwrap());
    assert!(!git.has_untracked_files(repo.path()).await.unwrap());
    assert_eq!(git.current_commit(repo.path()).await.unwrap(), repo.head());
}

#[tokio::test]
async fn test_ignored_addon_directories() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let of = GitRepo::init(dir.path().join("of"));
    of.write("addons/.gitignore", "/*\n!.gitignore\n!ofxGui\n");
    of.write("addons/ofxGui/src/gui.h", "// gui\n");
    of.commit_all("initial");

    // Plain directory inside the framework's ignored addons tree.
    of.write("addons/ofxPlain/plain.h", "// plain\n");
    // Independent repository nested inside the same ignored tree.
    let nested = GitRepo::init(of.path().join("addons/ofxNested"));
    nested.write("nested.h", "// nested\n");
    nested.commit_all("initial");

    let git = GitCli::new();
    assert!(!git.is_repo(&of.path().join("addons/ofxPlain")).await.unwrap());
    assert!(git.is_repo(nested.path()).await.unwrap());
    assert!(!git.has_untracked_files(nested.path()).await.unwrap());
    // Bundled addon tracked by the framework itself.
    assert!(git.is_repo(&of.path().join("addons/ofxGui")).await.unwrap());
}

#[tokio::test]
async fn test_detects_modifications() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let repo = GitRepo::init(dir.path().join("of"));
    repo.write("tracked.txt", "one\n");
    repo.commit_all("initial");

    let git = GitCli::new();
    repo.write("untracked.txt", "");
    assert!(git.has_untracked_files(repo.path()).await.unwrap());
    assert!(!git.has_uncommitted_changes(repo.path()).await.unwrap());

    std::fs::remove_file(repo.path().join("untracked.txt")).unwrap();
    repo.write("tracked.txt", "two\n");
    assert!(git.has_uncommitted_changes(repo.path()).await.unwrap());
}

#[tokio::test]
async fn test_branches_and_switch() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let repo = GitRepo::init(dir.path().join("of"));
    let first = repo.commit_all("first");
    repo.branch("stable");
    let second = repo.commit_all("second");

    let git = GitCli::new();
    assert_eq!(git.branches_at(repo.path(), &first).await.unwrap(), vec!["stable"]);
    assert_eq!(git.branches_at(repo.path(), &second).await.unwrap(), vec!["master"]);

    git.switch_to(repo.path(), "stable").await.unwrap();
    assert_eq!(repo.current_branch(), "stable");
    assert_eq!(repo.head(), first);

    git.switch_to(repo.path(), &second).await.unwrap();
    assert_eq!(repo.current_branch(), "HEAD");

    assert!(git.switch_to(repo.path(), "no-such-ref").await.is_err());
}

#[tokio::test]
async fn test_export_tree() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let repo = GitRepo::init(dir.path().join("of"));
    repo.write("README.md", "of\n");
    let sha = repo.commit_all("initial");

    let git = GitCli::new();
    let destination = dir.path().join("of.tar.gz");
    git.export_tree(repo.path(), &sha, "of", &destination)
        .await
        .unwrap();
    assert!(std::fs::metadata(&destination).unwrap().len() > 0);

    let missing = dir.path().join("missing.tar.gz");
    let result = git
        .export_tree(repo.path(), "0000000000000000000000000000000000000000", "of", &missing)
        .await;
    assert!(result.is_err());
}
