use anyhow::{Context, Result};
use clap::Args;
use console::style;
use wlater_core::device_id::{current_username, host_platform_name, DerivedDeviceId};

#[derive(Args, Debug)]
pub struct DeviceIdArgs {
    /// Derive for this login name instead of the current user
    #[arg(long)]
    pub username: Option<String>,

    /// Derive for this platform (Linux, Darwin, Windows, ...)
    #[arg(long)]
    pub platform: Option<String>,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DeviceIdArgs) -> Result<()> {
    let username = args
        .username
        .or_else(current_username)
        .context("Cannot determine the current username; pass --username")?;
    let platform = args
        .platform
        .unwrap_or_else(|| host_platform_name().to_string());

    let derived = DerivedDeviceId::from_parts(&username, &platform)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&derived)?);
    } else {
        print_breakdown(&derived);
    }
    Ok(())
}

/// Human-readable structure of a derived id
pub fn print_breakdown(derived: &DerivedDeviceId) {
    let id = &derived.device_id;
    println!("{} Detected OS: {}", style("✓").green(), derived.system);
    println!("{} System username: {}", style("✓").green(), derived.username);
    println!("{} Normalized: {}", style("✓").green(), derived.normalized);
    println!();
    println!("📱 Device ID: {}", style(id).bold());
    println!();
    println!("Structure breakdown:");
    println!("  - App prefix (wlater): {}", id.app_prefix());
    println!("  - Platform code ({}): {}", derived.system, id.platform_code());
    println!("  - Username encoded ({}): {}", derived.normalized, id.username_hex());
}
