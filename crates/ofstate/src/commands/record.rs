//! `record` command handler.

use super::CommonArgs;
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// If name already exists, overwrite existing entry
    #[arg(short, long)]
    pub update: bool,

    /// Short message describing the snapshot in more detail than the name
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Record the current commits into a snapshot.
pub async fn handle_record(args: RecordArgs) -> anyhow::Result<()> {
    let manager = args.common.open().await?;
    let name = args.common.snapshot_name(&manager);

    let snapshot = manager
        .record(&name, &args.description, args.update)
        .await?;
    info!(
        "Snapshot {} covers {} and {} addon(s)",
        snapshot.name,
        manager.layout().core_label,
        snapshot.addons.len()
    );
    Ok(())
}
