//! Multi-repository snapshots for openFrameworks projects.
//!
//! A project is a directory with a `config.make` naming the framework
//! checkout and an `addons.make` listing addons that live in the
//! framework's `addons/` directory. This crate:
//! - Records the commit of the framework and each addon as a named snapshot
//! - Checks a snapshot out again, preferring branch names over bare commits
//! - Archives a snapshot as one tarball per repository
//! - Lists the recorded snapshots
//!
//! # Example
//!
//! ```no_run
//! use ofstate_snapshot::{GitCli, StateManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = StateManager::open("apps/myApps/myProject", GitCli::new()).await?;
//!
//! manager.record("before-upgrade", "known good state", false).await?;
//! // ... update the framework and addons ...
//! manager.checkout("before-upgrade").await?;
//! manager.archive("before-upgrade").await?;
//! # Ok(())
//! # }
//! ```

mod archive;
mod checkout;
pub mod config;
mod error;
pub mod list;
mod manager;
pub mod project;
mod record;
mod snapshot;
mod store;
pub mod validate;
pub mod vcs;

pub use archive::{ArchiveReport, ArchiveStatus, ArchivedFile};
pub use checkout::{CheckoutReport, SwitchedRepo};
pub use config::LayoutConfig;
pub use error::{SnapshotError, SnapshotResult};
pub use manager::StateManager;
pub use snapshot::{AddonEntry, CoreEntry, Metadata, Revision, Snapshot, NON_GIT};
pub use store::MetadataStore;
pub use validate::{validate, RepoState};
pub use vcs::{GitCli, VersionControl};
