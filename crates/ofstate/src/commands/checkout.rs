//! `checkout` command handler.

use super::CommonArgs;
use clap::Args;
use tracing::debug;

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Switch the framework and addons to a recorded snapshot.
pub async fn handle_checkout(args: CheckoutArgs) -> anyhow::Result<()> {
    let manager = args.common.open().await?;
    let name = args.common.snapshot_name(&manager);

    let report = manager.checkout(&name).await?;
    for repo in &report.switched {
        debug!("{} is at {}", repo.name, repo.refname);
    }
    Ok(())
}
