use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use std::sync::Arc;
use wlater_core::credentials::{check_credentials, CredentialStore, FileCredentialStore};
use wlater_core::session::{KeepSession, SnapshotSyncClient};

use super::PathArgs;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also authenticate and load the account snapshot
    #[arg(long)]
    pub connect: bool,

    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CheckArgs, paths: &PathArgs) -> Result<()> {
    let config = paths.resolve()?;
    let store = FileCredentialStore::new(&config.credentials_path);
    let status = check_credentials(&store).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else if status.configured {
        println!("{} {}", style("✓").green(), status.message);
        if let Some(email) = &status.email {
            println!("  Account: {}", email);
        }
        println!("  File: {}", config.credentials_path.display());
    } else {
        println!("{} {}", style("✗").red(), status.message);
    }

    if !status.configured {
        bail!("wlater is not configured");
    }

    if args.connect {
        let credentials = store.load().await?;
        let client = Arc::new(SnapshotSyncClient::new(&config.snapshot_path));
        let session = KeepSession::connect(client, &credentials)
            .await
            .context("Authentication failed")?;

        let (notes, labels) = session.with_engine(|engine| {
            (engine.graph().note_count(), engine.list_labels().len())
        });
        if !args.json {
            println!(
                "{} Connected: {} notes, {} labels",
                style("✓").green(),
                notes,
                labels
            );
        }
    }

    Ok(())
}
