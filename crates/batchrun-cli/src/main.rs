//! batchrun — launch a distributed genetic-algorithm run on Azure Batch.
//!
//! Two subcommands cover the whole lifecycle this tool owns:
//!
//! ```text
//! batchrun create-pool --config batchrun.toml
//! batchrun launch --config batchrun.toml [--dry-run]
//! ```
//!
//! `create-pool` provisions the autoscaling pool once; `launch` assumes the
//! pool exists, creates a job with a per-node preparation task, and submits
//! one multi-instance task per configured worker count. Everything after
//! request acceptance (node allocation, scheduling, scaling, upload) is the
//! service's job.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "batchrun", about = "Distributed GA launcher for Azure Batch", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Provision the autoscaling compute pool.
    CreatePool {
        /// Path to the launch configuration.
        #[arg(long, default_value = "batchrun.toml")]
        config: PathBuf,
    },
    /// Create the job and submit one task per worker count.
    Launch {
        /// Path to the launch configuration.
        #[arg(long, default_value = "batchrun.toml")]
        config: PathBuf,

        /// Print the request bodies as JSON instead of submitting them.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,batchrun_cli=debug,batchrun_batch=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::CreatePool { config } => commands::pool::create(&config).await,
        Command::Launch { config, dry_run } => commands::launch::run(&config, dry_run).await,
    }
}
