//! Subcommand arguments and handlers.

mod archive;
mod checkout;
mod list;
mod record;

pub use archive::{handle_archive, ArchiveArgs};
pub use checkout::{handle_checkout, CheckoutArgs};
pub use list::{handle_list, ListArgs};
pub use record::{handle_record, RecordArgs};

use clap::Args;
use ofstate_snapshot::{GitCli, StateManager};
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the desired project directory, defaults to the current directory
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Name of the desired snapshot. Defaults to "latest", except when using list
    #[arg(short, long)]
    pub name: Option<String>,

    /// Switch on debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Open the project with the git command line backend.
    pub async fn open(&self) -> anyhow::Result<StateManager<GitCli>> {
        tracing::debug!(project = %self.project.display(), name = ?self.name, "Opening project");
        Ok(StateManager::open(&self.project, GitCli::new()).await?)
    }

    /// The requested snapshot name, or the project's default.
    pub fn snapshot_name(&self, manager: &StateManager<GitCli>) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| manager.layout().default_snapshot.clone())
    }
}
