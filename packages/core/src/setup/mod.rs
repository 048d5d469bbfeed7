//! Credential Setup Flow
//!
//! Mints a master token through the account provider's embedded sign-in page
//! and turns it into `Credentials`. The flow is an explicit state machine
//! driven by two collaborators: a `BrowserDriver` that performs (or asks the
//! user to perform) the sign-in, and a `TokenExchanger` that trades the
//! short-lived `oauth_token` cookie for a long-lived master token.
//!
//! ```text
//! NavigatingToLogin -> AwaitingEmail -> AwaitingPassword -> AwaitingManualSteps
//!                          |                 |                      |
//!                          +--- auto-fill ---+                ExtractingToken
//!                               failure                             |
//!                                                            ExchangingToken -> Done
//! ```
//!
//! Any non-terminal state can move to `Cancelled`; collaborator failures
//! other than auto-fill move to `Failed`.

use crate::credentials::Credentials;
use crate::device_id::{self, DerivedDeviceId, DeviceId};
use crate::error::{Result, WlaterError};
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, info, warn};

/// Embedded sign-in page that issues the `oauth_token` cookie
pub const EMBEDDED_SETUP_URL: &str = "https://accounts.google.com/embedded/setup/v2/android";

/// Expected prefix of the `oauth_token` cookie
pub const OAUTH_TOKEN_PREFIX: &str = "oauth2_4/";

/// Expected prefix of a master token
pub const MASTER_TOKEN_PREFIX: &str = "aas_et/";

/// Performs the interactive sign-in
#[async_trait]
pub trait BrowserDriver: Send {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Auto-fill the account email; failure falls back to manual entry
    async fn fill_email(&mut self, email: &str) -> Result<()>;

    /// Auto-fill the password; failure falls back to manual entry
    async fn fill_password(&mut self, password: &str) -> Result<()>;

    /// Block until the user has finished 2FA, consent and any CAPTCHA
    async fn wait_for_manual_steps(&mut self) -> Result<()>;

    /// Value of the `oauth_token` cookie, if the sign-in produced one
    async fn oauth_token_cookie(&mut self) -> Result<Option<String>>;
}

/// Exchanges an `oauth_token` for a master token
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange(&self, email: &str, oauth_token: &str, device_id: &DeviceId) -> Result<String>;
}

/// Position in the setup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    NavigatingToLogin,
    AwaitingEmail,
    AwaitingPassword,
    AwaitingManualSteps,
    ExtractingToken,
    ExchangingToken,
    Done,
    Failed,
    Cancelled,
}

impl SetupState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for SetupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NavigatingToLogin => "navigating to login",
            Self::AwaitingEmail => "awaiting email",
            Self::AwaitingPassword => "awaiting password",
            Self::AwaitingManualSteps => "awaiting manual steps",
            Self::ExtractingToken => "extracting token",
            Self::ExchangingToken => "exchanging token",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Result of a finished flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    Completed(Credentials),
    Failed(String),
    Cancelled,
}

/// Inputs collected before the browser opens
#[derive(Clone)]
pub struct SetupRequest {
    pub email: String,
    /// Absent when the user signs in by hand
    pub password: Option<String>,
    pub device_id: DeviceId,
}

impl SetupRequest {
    pub fn new(email: impl Into<String>, device_id: DeviceId) -> Result<Self> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(WlaterError::invalid_input("Email is required"));
        }
        Ok(Self {
            email,
            password: None,
            device_id,
        })
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Result<Self> {
        let password = password.into();
        if password.trim().is_empty() {
            return Err(WlaterError::invalid_input("Password is required"));
        }
        self.password = Some(password);
        Ok(self)
    }
}

impl fmt::Debug for SetupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("device_id", &self.device_id)
            .finish()
    }
}

/// Device id offered as the default at the prompt
///
/// Falls back to `deadbeefdeadbeef` when the current user cannot be derived.
pub fn default_device_id() -> (DeviceId, Option<DerivedDeviceId>) {
    match device_id::derive_for_current_user() {
        Ok(derived) => (derived.device_id.clone(), Some(derived)),
        Err(e) => {
            warn!("Error generating device id: {}. Using default.", e);
            (DeviceId::fallback(), None)
        }
    }
}

/// Interpret one answer to the device id prompt
///
/// Empty input keeps `default`; anything else must be a valid 16-hex-digit id.
pub fn choose_device_id(input: &str, default: &DeviceId) -> Result<DeviceId> {
    if input.trim().is_empty() {
        Ok(default.clone())
    } else {
        DeviceId::parse(input)
    }
}

/// State machine producing `Credentials`
pub struct SetupFlow<B, X> {
    request: SetupRequest,
    browser: B,
    exchanger: X,
    state: SetupState,
    oauth_token: Option<String>,
    credentials: Option<Credentials>,
    failure: Option<String>,
}

impl<B, X> SetupFlow<B, X>
where
    B: BrowserDriver,
    X: TokenExchanger,
{
    pub fn new(request: SetupRequest, browser: B, exchanger: X) -> Self {
        Self {
            request,
            browser,
            exchanger,
            state: SetupState::NavigatingToLogin,
            oauth_token: None,
            credentials: None,
            failure: None,
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Abandon the flow; no effect once terminal
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            info!("Setup cancelled in state: {}", self.state);
            self.state = SetupState::Cancelled;
        }
    }

    /// The outcome once the flow is terminal
    pub fn outcome(&self) -> Option<SetupOutcome> {
        match self.state {
            SetupState::Done => self.credentials.clone().map(SetupOutcome::Completed),
            SetupState::Failed => Some(SetupOutcome::Failed(
                self.failure.clone().unwrap_or_default(),
            )),
            SetupState::Cancelled => Some(SetupOutcome::Cancelled),
            _ => None,
        }
    }

    /// Drive the flow to a terminal state
    pub async fn run(&mut self) -> SetupOutcome {
        loop {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            self.step().await;
        }
    }

    /// Advance by one state
    pub async fn step(&mut self) -> SetupState {
        let next = match self.state {
            SetupState::NavigatingToLogin => {
                info!("Navigating to {}", EMBEDDED_SETUP_URL);
                match self.browser.navigate(EMBEDDED_SETUP_URL).await {
                    Ok(()) => SetupState::AwaitingEmail,
                    Err(e) => self.fail(format!("Could not open the sign-in page: {}", e)),
                }
            }
            SetupState::AwaitingEmail => match self.browser.fill_email(&self.request.email).await {
                Ok(()) => SetupState::AwaitingPassword,
                Err(e) => {
                    warn!("Could not auto-fill email: {}. Continue manually.", e);
                    SetupState::AwaitingManualSteps
                }
            },
            SetupState::AwaitingPassword => match &self.request.password {
                Some(password) => match self.browser.fill_password(password).await {
                    Ok(()) => SetupState::AwaitingManualSteps,
                    Err(e) => {
                        warn!("Could not auto-fill password: {}. Continue manually.", e);
                        SetupState::AwaitingManualSteps
                    }
                },
                None => {
                    debug!("No password supplied, sign-in continues manually");
                    SetupState::AwaitingManualSteps
                }
            },
            SetupState::AwaitingManualSteps => match self.browser.wait_for_manual_steps().await {
                Ok(()) => SetupState::ExtractingToken,
                Err(e) => self.fail(format!("Sign-in was not completed: {}", e)),
            },
            SetupState::ExtractingToken => match self.browser.oauth_token_cookie().await {
                Ok(Some(token)) if !token.trim().is_empty() => {
                    if !token.starts_with(OAUTH_TOKEN_PREFIX) {
                        warn!(
                            "oauth_token doesn't start with '{}', it might be incorrect",
                            OAUTH_TOKEN_PREFIX
                        );
                    }
                    self.oauth_token = Some(token.trim().to_string());
                    SetupState::ExchangingToken
                }
                Ok(_) => self.fail(
                    "Could not find oauth_token in cookies. Make sure you clicked 'I agree' \
                     and waited for the page to finish loading.",
                ),
                Err(e) => self.fail(format!("Could not read cookies: {}", e)),
            },
            SetupState::ExchangingToken => self.exchange().await,
            terminal => terminal,
        };

        if next != self.state {
            debug!(from = %self.state, to = %next, "setup transition");
        }
        self.state = next;
        next
    }

    async fn exchange(&mut self) -> SetupState {
        let Some(oauth_token) = self.oauth_token.as_deref() else {
            return self.fail("No oauth_token to exchange");
        };

        let result = self
            .exchanger
            .exchange(&self.request.email, oauth_token, &self.request.device_id)
            .await;

        match result {
            Ok(master_token) => {
                let master_token = master_token.trim().to_string();
                if !master_token.starts_with(MASTER_TOKEN_PREFIX) {
                    warn!(
                        "Master token doesn't start with '{}', it might be incorrect",
                        MASTER_TOKEN_PREFIX
                    );
                }

                let credentials = Credentials::new(
                    self.request.email.clone(),
                    master_token,
                    self.request.device_id.clone(),
                );
                if let Err(e) = credentials.validate() {
                    return self.fail(e.to_string());
                }

                info!(device_id = %self.request.device_id, "Obtained master token for {}", self.request.email);
                self.credentials = Some(credentials);
                SetupState::Done
            }
            Err(e) => self.fail(format!(
                "Error exchanging token: {}. OAuth tokens expire within minutes, try again.",
                e
            )),
        }
    }

    fn fail(&mut self, reason: impl Into<String>) -> SetupState {
        let reason = reason.into();
        warn!("Setup failed: {}", reason);
        self.failure = Some(reason);
        SetupState::Failed
    }
}

impl<B, X> fmt::Debug for SetupFlow<B, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupFlow")
            .field("request", &self.request)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
