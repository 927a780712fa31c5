//! `archive` command handler.

use super::CommonArgs;
use clap::Args;
use ofstate_snapshot::ArchiveStatus;
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Write one tarball per repository for a snapshot.
pub async fn handle_archive(args: ArchiveArgs) -> anyhow::Result<()> {
    let manager = args.common.open().await?;
    let name = args.common.snapshot_name(&manager);

    let report = manager.archive(&name).await?;
    for file in &report.files {
        let status = match file.status {
            ArchiveStatus::Created => "created",
            ArchiveStatus::Skipped => "kept",
        };
        debug!("{}: {} ({})", file.repository, file.path.display(), status);
    }
    info!("Archive files are in {}", report.directory.display());
    Ok(())
}
