use anyhow::Result;
use clap::Args;
use tracing::info;
use wlater_core::mcp::{run_mcp_server, McpServices};

use super::PathArgs;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Cap on list_all_notes results [default: 1000]
    #[arg(long)]
    pub list_limit: Option<usize>,

    /// Default cap on search_notes results [default: 100]
    #[arg(long)]
    pub search_limit: Option<usize>,
}

pub async fn run(args: ServeArgs, paths: &PathArgs) -> Result<()> {
    let mut config = paths.resolve()?;
    if let Some(limit) = args.list_limit {
        config = config.with_list_limit(limit);
    }
    if let Some(limit) = args.search_limit {
        config = config.with_search_limit(limit);
    }

    info!(
        credentials = %config.credentials_path.display(),
        snapshot = %config.snapshot_path.display(),
        "Starting wlater MCP server"
    );

    run_mcp_server(McpServices::from_config(config)).await
}
