//! `list` command handler.

use super::CommonArgs;
use clap::Args;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print all snapshots, or one snapshot in detail when `-n` is given.
pub async fn handle_list(args: ListArgs) -> anyhow::Result<()> {
    let manager = args.common.open().await?;

    for line in manager.list(args.common.name.as_deref()).await? {
        println!("{}", line);
    }
    Ok(())
}
