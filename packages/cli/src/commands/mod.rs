use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use wlater_core::config::{ServerConfig, CONFIG_ENV, SNAPSHOT_ENV};

pub mod check;
pub mod device_id;
pub mod serve;
pub mod setup;

#[derive(Parser, Debug)]
#[command(name = "wlater")]
#[command(about = "Read-only Google Keep access for AI assistants", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Filter used when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => crate::DEFAULT_LOG_FILTER,
            1 => "wlater=debug,wlater_core=debug",
            _ => "wlater=trace,wlater_core=trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve(serve::ServeArgs),

    /// Obtain a master token and save credentials
    Setup(setup::SetupArgs),

    /// Show the device id derived for this machine
    DeviceId(device_id::DeviceIdArgs),

    /// Check that credentials are configured
    Check(check::CheckArgs),
}

/// File locations shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Credentials file [default: ~/.wlater/credentials.json]
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Account snapshot file [default: ~/.wlater/snapshot.json]
    #[arg(long, global = true, env = SNAPSHOT_ENV, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

impl PathArgs {
    pub fn resolve(&self) -> Result<ServerConfig> {
        ServerConfig::resolve(self.config.clone(), self.snapshot.clone())
            .context("Failed to resolve wlater configuration")
    }
}
