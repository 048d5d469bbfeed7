//! Hand-driven setup collaborators
//!
//! The user signs in with their own browser and copies values across; no
//! browser automation or token exchange protocol runs in-process.

use async_trait::async_trait;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};
use wlater_core::device_id::DeviceId;
use wlater_core::error::{Result, WlaterError};
use wlater_core::setup::{BrowserDriver, TokenExchanger, OAUTH_TOKEN_PREFIX};

/// Run a blocking dialoguer prompt off the async executor
async fn prompt<T, F>(f: F) -> Result<T>
where
    F: FnOnce(&ColorfulTheme) -> dialoguer::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&ColorfulTheme::default()))
        .await
        .map_err(|e| WlaterError::invalid_input(format!("Prompt task failed: {}", e)))?
        .map_err(|e| WlaterError::invalid_input(format!("Prompt failed: {}", e)))
}

/// `BrowserDriver` that walks the user through signing in by hand
#[derive(Debug, Default)]
pub struct ManualBrowser;

#[async_trait]
impl BrowserDriver for ManualBrowser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        println!();
        println!("{}", style("Open this page in a private browser window:").bold());
        println!("  {}", style(url).cyan());
        Ok(())
    }

    async fn fill_email(&mut self, email: &str) -> Result<()> {
        println!("📧 Sign in as {}", style(email).bold());
        Ok(())
    }

    async fn fill_password(&mut self, _password: &str) -> Result<()> {
        println!("🔑 Enter your password in the browser");
        Ok(())
    }

    async fn wait_for_manual_steps(&mut self) -> Result<()> {
        println!();
        println!("{}", style("📝 MANUAL STEPS IN BROWSER:").bold());
        println!("1. Solve any CAPTCHA if it appears");
        println!("2. Complete any 2FA verification");
        println!("3. Click 'I agree' when you see the terms");
        println!("4. Wait 5-10 seconds for the page to finish loading");
        println!();

        let done = prompt(|theme| {
            Confirm::with_theme(theme)
                .with_prompt("Did you click 'I agree' and wait for the page to load?")
                .default(true)
                .interact()
        })
        .await?;

        if done {
            Ok(())
        } else {
            Err(WlaterError::invalid_input("Sign-in was not confirmed"))
        }
    }

    async fn oauth_token_cookie(&mut self) -> Result<Option<String>> {
        println!();
        println!("Copy the {} cookie for accounts.google.com:", style("oauth_token").bold());
        println!("  DevTools → Application → Cookies → https://accounts.google.com");
        println!("  The value starts with '{}'", OAUTH_TOKEN_PREFIX);

        let value = prompt(|theme| {
            Input::<String>::with_theme(theme)
                .with_prompt("oauth_token")
                .allow_empty(true)
                .interact_text()
        })
        .await?;

        let value = value.trim().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }
}

/// `TokenExchanger` that asks the user to run the exchange and paste the result
#[derive(Debug, Default)]
pub struct PastedTokenExchanger;

#[async_trait]
impl TokenExchanger for PastedTokenExchanger {
    async fn exchange(&self, email: &str, oauth_token: &str, device_id: &DeviceId) -> Result<String> {
        println!();
        println!("{}", style("🔄 Exchange the oauth_token for a master token").bold());
        println!("OAuth tokens expire within minutes, so do this right away, e.g.:");
        println!();
        println!(
            "  python -c \"import gpsoauth; print(gpsoauth.exchange_token('{}', '{}', '{}')['Token'])\"",
            email, oauth_token, device_id
        );
        println!();

        let token = prompt(|theme| {
            Password::with_theme(theme)
                .with_prompt("Master token (aas_et/...)")
                .allow_empty_password(true)
                .interact()
        })
        .await?;

        if token.trim().is_empty() {
            return Err(WlaterError::authentication_failed("No master token entered"));
        }
        Ok(token)
    }
}
