//! In-memory version control for testing snapshot operations without git.

use async_trait::async_trait;
use ofstate_snapshot::{SnapshotError, SnapshotResult, VersionControl};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A fake [`VersionControl`] with configurable repositories.
///
/// Directories that were not registered with [`FakeVcs::with_repo`] are
/// reported as plain directories. Every mutating call is recorded.
///
/// # Example
///
/// ```rust
/// use ofstate_test_utils::mocks::FakeVcs;
///
/// let vcs = FakeVcs::new()
///     .with_repo("/work/of", "1111111111")
///     .with_branch("/work/of", "master", "1111111111");
///
/// assert_eq!(vcs.head("/work/of").as_deref(), Some("1111111111"));
/// ```
#[derive(Clone, Default)]
pub struct FakeVcs {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    repos: HashMap<PathBuf, FakeRepo>,
    calls: Vec<VcsCall>,
}

#[derive(Debug, Clone, Default)]
struct FakeRepo {
    head: String,
    /// (branch, commit) in author date order.
    branches: Vec<(String, String)>,
    dirty: bool,
    untracked: bool,
    fail_switch: bool,
    fail_export: bool,
}

/// A recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Switch { dir: PathBuf, refname: String },
    Export {
        dir: PathBuf,
        commit: String,
        prefix: String,
        destination: PathBuf,
    },
}

/// Registered paths and queried paths may differ by symlinks (temp dirs).
fn key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| ofstate_util::path::normalize(path))
}

impl FakeVcs {
    /// Create a fake with no repositories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clean repository at `dir` with `head` checked out.
    pub fn with_repo(self, dir: impl AsRef<Path>, head: &str) -> Self {
        self.state.lock().unwrap().repos.insert(
            key(dir.as_ref()),
            FakeRepo {
                head: head.to_string(),
                ..FakeRepo::default()
            },
        );
        self
    }

    /// Add a local branch pointing at `commit`. Later branches count as newer.
    pub fn with_branch(self, dir: impl AsRef<Path>, branch: &str, commit: &str) -> Self {
        self.edit(dir.as_ref(), |repo| {
            repo.branches.push((branch.to_string(), commit.to_string()))
        });
        self
    }

    /// Mark tracked files in `dir` as modified.
    pub fn set_dirty(&self, dir: impl AsRef<Path>, dirty: bool) {
        self.edit(dir.as_ref(), |repo| repo.dirty = dirty);
    }

    /// Mark `dir` as holding untracked files.
    pub fn set_untracked(&self, dir: impl AsRef<Path>, untracked: bool) {
        self.edit(dir.as_ref(), |repo| repo.untracked = untracked);
    }

    /// Move `HEAD` of `dir` without recording a call.
    pub fn set_head(&self, dir: impl AsRef<Path>, head: &str) {
        self.edit(dir.as_ref(), |repo| repo.head = head.to_string());
    }

    /// Make every switch in `dir` fail.
    pub fn fail_switch(&self, dir: impl AsRef<Path>) {
        self.edit(dir.as_ref(), |repo| repo.fail_switch = true);
    }

    /// Make every export from `dir` fail.
    pub fn fail_export(&self, dir: impl AsRef<Path>) {
        self.edit(dir.as_ref(), |repo| repo.fail_export = true);
    }

    /// Forget the repository at `dir`, turning it into a plain directory.
    pub fn remove_repo(&self, dir: impl AsRef<Path>) {
        self.state.lock().unwrap().repos.remove(&key(dir.as_ref()));
    }

    /// Current `HEAD` of `dir`, if it is a registered repository.
    pub fn head(&self, dir: impl AsRef<Path>) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .repos
            .get(&key(dir.as_ref()))
            .map(|repo| repo.head.clone())
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<VcsCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Refs passed to `switch_to`, in order.
    pub fn switches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                VcsCall::Switch { refname, .. } => Some(refname),
                VcsCall::Export { .. } => None,
            })
            .collect()
    }

    /// Number of `export_tree` calls.
    pub fn export_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, VcsCall::Export { .. }))
            .count()
    }

    fn edit(&self, dir: &Path, f: impl FnOnce(&mut FakeRepo)) {
        let mut state = self.state.lock().unwrap();
        let repo = state
            .repos
            .get_mut(&key(dir))
            .unwrap_or_else(|| panic!("No fake repository at {}", dir.display()));
        f(repo);
    }

    fn repo(&self, dir: &Path) -> SnapshotResult<FakeRepo> {
        self.state
            .lock()
            .unwrap()
            .repos
            .get(&key(dir))
            .cloned()
            .ok_or_else(|| {
                SnapshotError::command("fake", format!("not a repository: {}", dir.display()))
            })
    }
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn is_repo(&self, dir: &Path) -> SnapshotResult<bool> {
        Ok(self.state.lock().unwrap().repos.contains_key(&key(dir)))
    }

    async fn has_uncommitted_changes(&self, dir: &Path) -> SnapshotResult<bool> {
        Ok(self.repo(dir)?.dirty)
    }

    async fn has_untracked_files(&self, dir: &Path) -> SnapshotResult<bool> {
        Ok(self.repo(dir)?.untracked)
    }

    async fn current_commit(&self, dir: &Path) -> SnapshotResult<String> {
        Ok(self.repo(dir)?.head)
    }

    async fn branches_at(&self, dir: &Path, commit: &str) -> SnapshotResult<Vec<String>> {
        Ok(self
            .repo(dir)?
            .branches
            .into_iter()
            .filter(|(_, sha)| sha == commit)
            .map(|(name, _)| name)
            .collect())
    }

    async fn switch_to(&self, dir: &Path, refname: &str) -> SnapshotResult<()> {
        let repo = self.repo(dir)?;
        self.state.lock().unwrap().calls.push(VcsCall::Switch {
            dir: key(dir),
            refname: refname.to_string(),
        });
        if repo.fail_switch {
            return Err(SnapshotError::command(
                format!("fake checkout {refname}"),
                "switch refused",
            ));
        }

        let target = repo
            .branches
            .iter()
            .find(|(name, _)| name == refname)
            .map(|(_, sha)| sha.clone())
            .unwrap_or_else(|| refname.to_string());
        self.edit(dir, |repo| repo.head = target);
        Ok(())
    }

    async fn export_tree(
        &self,
        dir: &Path,
        commit: &str,
        prefix: &str,
        destination: &Path,
    ) -> SnapshotResult<()> {
        let repo = self.repo(dir)?;
        self.state.lock().unwrap().calls.push(VcsCall::Export {
            dir: key(dir),
            commit: commit.to_string(),
            prefix: prefix.to_string(),
            destination: destination.to_path_buf(),
        });
        if repo.fail_export {
            return Err(SnapshotError::command("fake archive", "export refused"));
        }
        std::fs::write(destination, format!("{prefix}@{commit}"))?;
        Ok(())
    }
}
