use anyhow::{bail, Result};
use clap::Args;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use tracing::info;
use wlater_core::credentials::{check_credentials, CredentialStore, FileCredentialStore};
use wlater_core::device_id::DeviceId;
use wlater_core::setup::{
    choose_device_id, default_device_id, SetupFlow, SetupOutcome, SetupRequest,
};

use super::device_id::print_breakdown;
use super::PathArgs;
use crate::manual::{ManualBrowser, PastedTokenExchanger};

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Google account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// 16-hex-digit device id to use instead of the derived one
    #[arg(long)]
    pub device_id: Option<String>,

    /// Replace existing credentials without asking
    #[arg(long)]
    pub force: bool,
}

pub async fn run(args: SetupArgs, paths: &PathArgs) -> Result<()> {
    let config = paths.resolve()?;
    let store = FileCredentialStore::new(&config.credentials_path);
    let theme = ColorfulTheme::default();

    print_welcome();

    if !args.force && check_credentials(&store).await.configured {
        let replace = Confirm::with_theme(&theme)
            .with_prompt(format!(
                "Credentials already exist at {}. Replace them?",
                config.credentials_path.display()
            ))
            .default(false)
            .interact()?;
        if !replace {
            println!("Keeping existing credentials.");
            return Ok(());
        }
    }

    println!("{}", style("🔧 Generating device ID...").bold());
    let (generated, derived) = default_device_id();
    match &derived {
        Some(derived) => print_breakdown(derived),
        None => println!("Using default device ID: {}", generated),
    }
    println!();

    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Google email")
            .interact_text()?,
    };

    let device_id = match args.device_id {
        Some(raw) => choose_device_id(&raw, &generated)?,
        None => prompt_device_id(&theme, &generated)?,
    };
    println!("✓ Using device ID: {}", device_id);

    let request = SetupRequest::new(email, device_id)?;
    let mut flow = SetupFlow::new(request, ManualBrowser, PastedTokenExchanger);

    let interrupted = tokio::select! {
        _ = flow.run() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        flow.cancel();
    }

    match flow.outcome() {
        Some(SetupOutcome::Completed(credentials)) => {
            store.save(&credentials).await?;
            info!(email = %credentials.email, "setup complete");
            println!();
            println!(
                "{} Saved credentials to {}",
                style("✅").green(),
                config.credentials_path.display()
            );
            Ok(())
        }
        Some(SetupOutcome::Cancelled) => {
            println!();
            println!("🛑 Setup cancelled");
            // A prompt may still be blocked on stdin
            std::process::exit(0);
        }
        Some(SetupOutcome::Failed(reason)) => bail!(reason),
        None => bail!("Setup stopped in state: {}", flow.state()),
    }
}

/// Ask until the answer is empty (keep the generated id) or a valid id
fn prompt_device_id(theme: &ColorfulTheme, generated: &DeviceId) -> Result<DeviceId> {
    println!("💡 Press ENTER to use the generated ID, or type your own 16-character hex ID");

    let input: String = Input::with_theme(theme)
        .with_prompt("Device ID")
        .default(generated.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            choose_device_id(input, generated)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    Ok(choose_device_id(&input, generated)?)
}

fn print_welcome() {
    println!();
    println!("{}", style("wlater setup").bold().cyan());
    println!(
        "{}",
        style("Mints a Google master token and saves it for the MCP server.").dim()
    );
    println!("You will sign in with your own browser and paste two values back here.");
    println!("Press Ctrl+C at any time to cancel.");
    println!();
}
