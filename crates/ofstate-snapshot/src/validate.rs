//! Repository validation.

use crate::{SnapshotError, SnapshotResult, VersionControl};
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// A repository with no modifications and no untracked files.
    Clean,
    /// An existing directory without version control, accepted because
    /// validation was not strict.
    NonGit,
}

/// Check that `dir` is a clean, trackable repository.
///
/// A missing directory is always an error. A directory without version
/// control is an error when `strict` is set and [`RepoState::NonGit`]
/// otherwise. Uncommitted changes or untracked files are always errors.
/// All errors carry `name`.
pub async fn validate<V>(
    vcs: &V,
    name: &str,
    dir: &Path,
    strict: bool,
) -> SnapshotResult<RepoState>
where
    V: VersionControl + ?Sized,
{
    if !tokio::fs::metadata(dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        return Err(SnapshotError::MissingDirectory {
            name: name.to_string(),
            path: dir.to_path_buf(),
        });
    }

    debug!("Checking if {} is in a git repository", dir.display());
    if !vcs.is_repo(dir).await? {
        if strict {
            return Err(SnapshotError::NotARepository {
                name: name.to_string(),
                path: dir.to_path_buf(),
            });
        }
        warn!("Not in a git repository: {}", dir.display());
        return Ok(RepoState::NonGit);
    }

    if vcs.has_uncommitted_changes(dir).await? {
        return Err(SnapshotError::UncommittedChanges {
            name: name.to_string(),
        });
    }

    if vcs.has_untracked_files(dir).await? {
        return Err(SnapshotError::UntrackedFiles {
            name: name.to_string(),
        });
    }

    debug!("Repository {} clean", name);
    Ok(RepoState::Clean)
}
