//! Real git repositories for end-to-end tests.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Whether a `git` executable can be run.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A git repository created for a test.
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    /// Initialise a repository in `dir` (created if missing) on branch `master`.
    pub fn init(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));

        let repo = Self { dir };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Repository directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write a file relative to the repository.
    pub fn write(&self, path: impl AsRef<Path>, contents: &str) -> &Self {
        let full_path = self.dir.join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(&full_path, contents)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", full_path.display(), e));
        self
    }

    /// Stage everything and commit, returning the new commit hash.
    pub fn commit_all(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "--quiet", "--allow-empty", "-m", message]);
        self.head()
    }

    /// Create a branch at the current commit without switching to it.
    pub fn branch(&self, name: &str) {
        self.git(&["branch", name]);
    }

    /// Switch to a ref.
    pub fn checkout(&self, refname: &str) {
        self.git(&["checkout", "--quiet", refname]);
    }

    /// Full hash of `HEAD`.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Short symbolic name of `HEAD`, or `HEAD` when detached.
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Run git in the repository, panicking on failure. Returns trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .unwrap_or_else(|e| panic!("Failed to run git {:?}: {}", args, e));
        if !output.status.success() {
            panic!(
                "git {:?} failed in {}: {}",
                args,
                self.dir.display(),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
