//! ofstate - record and restore the state of openFrameworks projects.
//!
//! This is the main entry point for the ofstate CLI.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ArchiveArgs, CheckoutArgs, ListArgs, RecordArgs};
use ofstate_util::LogConfig;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "ofstate")]
#[command(
    author,
    version,
    about = "Record and restore the state of your openFrameworks projects and archive their files.",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the state of all relevant components into a snapshot
    Record(RecordArgs),
    /// Check out the complete named or latest snapshot of your project and OF
    Checkout(CheckoutArgs),
    /// Archive all relevant components for the named or latest snapshot
    Archive(ArchiveArgs),
    /// List available snapshots. -n gives more detailed info about named snapshot
    List(ListArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Record(args) => args.common.verbose,
            Commands::Checkout(args) => args.common.verbose,
            Commands::Archive(args) => args.common.verbose,
            Commands::List(args) => args.common.verbose,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    ofstate_util::log::init(LogConfig::verbose(cli.command.verbose()));

    info!("Start processing.");
    let result = match cli.command {
        Commands::Record(args) => commands::handle_record(args).await,
        Commands::Checkout(args) => commands::handle_checkout(args).await,
        Commands::Archive(args) => commands::handle_archive(args).await,
        Commands::List(args) => commands::handle_list(args).await,
    };

    match result {
        Ok(()) => {
            info!("Successfully finished processing!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "Command failed");
            error!("{:#}", e);
            error!("An error occurred! Aborting execution.");
            ExitCode::FAILURE
        }
    }
}
