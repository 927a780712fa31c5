//! Snapshot data structures.

use crate::{SnapshotError, SnapshotResult};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stored in place of a commit identifier for directories without git.
pub const NON_GIT: &str = "non-git";

/// Length of the commit prefix used in archive names.
const SHORT_LEN: usize = 7;

/// Recorded version state of one directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Revision {
    /// Full commit hash.
    Commit(String),
    /// Directory is intentionally not under version control.
    NonGit,
}

impl Revision {
    /// Whether the directory was recorded as a git repository.
    pub fn is_git(&self) -> bool {
        matches!(self, Revision::Commit(_))
    }

    /// Commit hash, if any.
    pub fn commit(&self) -> Option<&str> {
        match self {
            Revision::Commit(sha) => Some(sha),
            Revision::NonGit => None,
        }
    }

    /// Seven character prefix used in archive file names.
    pub fn short(&self) -> &str {
        let full = self.as_str();
        match full.char_indices().nth(SHORT_LEN) {
            Some((idx, _)) => &full[..idx],
            None => full,
        }
    }

    /// The stored string form.
    pub fn as_str(&self) -> &str {
        match self {
            Revision::Commit(sha) => sha,
            Revision::NonGit => NON_GIT,
        }
    }
}

impl From<String> for Revision {
    fn from(s: String) -> Self {
        if s == NON_GIT {
            Revision::NonGit
        } else {
            Revision::Commit(s)
        }
    }
}

impl From<Revision> for String {
    fn from(revision: Revision) -> Self {
        match revision {
            Revision::Commit(sha) => sha,
            Revision::NonGit => NON_GIT.to_string(),
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The framework checkout as recorded in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreEntry {
    /// Path as written in the build configuration, usually relative to the project.
    pub path: String,
    /// Commit the framework was at.
    pub sha: Revision,
}

/// One addon directory as recorded in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonEntry {
    /// Directory name under the framework's addons directory.
    pub name: String,
    /// Commit the addon was at, or [`Revision::NonGit`].
    pub sha: Revision,
}

/// A named point-in-time record of the framework and its addons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unique within one metadata file.
    pub name: String,

    /// When the snapshot was recorded (local time).
    pub date: NaiveDateTime,

    /// Free text supplied with `-d`.
    #[serde(default)]
    pub description: String,

    /// The framework repository.
    pub core: CoreEntry,

    /// Addons in discovery order.
    #[serde(default)]
    pub addons: Vec<AddonEntry>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current local time.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        core: CoreEntry,
        addons: Vec<AddonEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            date: Local::now().naive_local(),
            description: description.into(),
            core,
            addons,
        }
    }

    /// Names of addons recorded without version control.
    pub fn non_git_addons(&self) -> Vec<&str> {
        self.addons
            .iter()
            .filter(|addon| !addon.sha.is_git())
            .map(|addon| addon.name.as_str())
            .collect()
    }
}

/// Contents of a project's metadata file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl Metadata {
    /// Look up a snapshot by name.
    pub fn find(&self, name: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.name == name)
    }

    /// Whether a snapshot with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Add a snapshot, replacing an existing one of the same name only when
    /// `overwrite` is set. On collision without `overwrite` nothing changes.
    pub fn insert(&mut self, snapshot: Snapshot, overwrite: bool) -> SnapshotResult<()> {
        if self.contains(&snapshot.name) {
            if !overwrite {
                return Err(SnapshotError::NameCollision(snapshot.name));
            }
            self.snapshots.retain(|s| s.name != snapshot.name);
        }
        self.snapshots.push(snapshot);
        Ok(())
    }
}
