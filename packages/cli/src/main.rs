//! wlater command line
//!
//! `wlater serve` is what an MCP client launches. Stdout carries JSON-RPC
//! only, so all logging goes to stderr.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod manual;

use commands::{Cli, Commands};

const DEFAULT_LOG_FILTER: &str = "wlater=info,wlater_core=info";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, &cli.paths).await,
        Commands::Setup(args) => commands::setup::run(args, &cli.paths).await,
        Commands::DeviceId(args) => commands::device_id::run(args),
        Commands::Check(args) => commands::check::run(args, &cli.paths).await,
    }
}
