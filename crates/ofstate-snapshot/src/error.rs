//! Snapshot error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The project directory does not exist.
    #[error("Project directory does not exist: {}", .0.display())]
    ProjectNotFound(PathBuf),

    /// A required configuration file is missing.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The build configuration has no framework root entry.
    #[error("Did not find OF location in {file} in {}", .project.display())]
    FrameworkRootNotFound { file: String, project: PathBuf },

    /// The layout override file could not be parsed.
    #[error("Invalid configuration in {}: {message}", .path.display())]
    InvalidConfig { path: PathBuf, message: String },

    /// An expected repository directory is absent.
    #[error("{name} does not exist at {}", .path.display())]
    MissingDirectory { name: String, path: PathBuf },

    /// Directory exists but is not under version control.
    #[error("{name}: not in a git repository: {}", .path.display())]
    NotARepository { name: String, path: PathBuf },

    /// Tracked files have been modified.
    #[error("{name}: Repository has uncommitted changes, commit those before continuing!")]
    UncommittedChanges { name: String },

    /// Files exist that are neither tracked nor ignored.
    #[error("{name}: Repository has untracked files, either commit, ignore or delete them.")]
    UntrackedFiles { name: String },

    /// No metadata file in the project.
    #[error("Could not open file: {}", .0.display())]
    MetadataNotFound(PathBuf),

    /// Named snapshot is absent from the metadata file.
    #[error("Snapshot entry {0} does not exist.")]
    SnapshotNotFound(String),

    /// Recording over an existing name without the update flag.
    #[error("{0}: entry with the same name already exists. Use -u option to overwrite.")]
    NameCollision(String),

    /// Export of a repository or directory did not succeed.
    #[error("Failed to archive {name}: {message}")]
    ArchiveFailed { name: String, message: String },

    /// Switching a working tree to a recorded ref failed.
    #[error("An error occurred checking out {name}: {message}")]
    SwitchFailed { name: String, message: String },

    /// An external tool could not be run or returned unusable output.
    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Create a command error.
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create an archive failure error.
    pub fn archive_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArchiveFailed {
            name: name.into(),
            message: message.into(),
        }
    }
}
