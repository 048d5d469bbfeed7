//! Device Identifier Derivation
//!
//! The note service's authentication protocol requires a stable 16-hex-digit
//! device id. Instead of persisting a random one, wlater derives it from the
//! host platform and the login name so it can be recomputed on every run:
//!
//! ```text
//!  776c61  02  46edd49c
//!  ------  --  --------
//!  app     OS  base-36 username, as 8 hex digits
//! ```
//!
//! # Examples
//!
//! ```rust
//! use wlater_core::device_id::{derive, DeviceId};
//!
//! let id = derive("JohnDoe123", "Linux").unwrap();
//! assert_eq!(id.as_str(), "776c610246edd49c");
//!
//! assert!("776c610112345".parse::<DeviceId>().is_err());
//! ```

use crate::error::{Result, WlaterError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application tag ("wla" in ASCII hex)
pub const APP_PREFIX: &str = "776c61";

/// Platform code for hosts missing from the table
pub const UNKNOWN_PLATFORM_CODE: &str = "00";

/// Id used by the setup flow when derivation is impossible
pub const FALLBACK_DEVICE_ID: &str = "deadbeefdeadbeef";

/// Length of every device id
pub const DEVICE_ID_LEN: usize = 16;

const NORMALIZED_LEN: usize = 6;
const USERNAME_PREFIX_LEN: usize = 8;

const PLATFORM_CODES: &[(&str, &str)] = &[
    ("Windows", "01"),
    ("Linux", "02"),
    ("Darwin", "03"),
    ("macOS", "03"),
    ("Java", "04"),
    ("FreeBSD", "05"),
    ("OpenBSD", "06"),
    ("NetBSD", "07"),
    ("SunOS", "08"),
    ("AIX", "09"),
    ("HP-UX", "0a"),
];

/// Validated 16-character lowercase hexadecimal device id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Validate an externally supplied id
    ///
    /// Surrounding whitespace is ignored and uppercase digits are folded to
    /// lowercase. Anything other than exactly 16 hex digits is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let candidate = input.trim();
        let len = candidate.chars().count();
        if len != DEVICE_ID_LEN {
            return Err(WlaterError::invalid_input(format!(
                "Device id must be exactly {} characters (got {})",
                DEVICE_ID_LEN, len
            )));
        }
        if !candidate.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WlaterError::invalid_input(
                "Device id must contain only hexadecimal characters (0-9, a-f)",
            ));
        }
        Ok(Self(candidate.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Characters 0..6
    pub fn app_prefix(&self) -> &str {
        &self.0[0..6]
    }

    /// Characters 6..8
    pub fn platform_code(&self) -> &str {
        &self.0[6..8]
    }

    /// Characters 8..16
    pub fn username_hex(&self) -> &str {
        &self.0[8..16]
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_DEVICE_ID.to_string())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = WlaterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = WlaterError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

/// Two-hex-digit code for a platform name, `00` when unknown
pub fn platform_code(host_platform: &str) -> &'static str {
    PLATFORM_CODES
        .iter()
        .find(|(name, _)| *name == host_platform)
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_PLATFORM_CODE)
}

/// Reduce a login name to exactly six base-36 characters
///
/// First 8 characters, lowercased, ASCII alphanumerics only, truncated to 6
/// and right-padded with `'0'`.
pub fn normalize_username(raw_username: &str) -> String {
    let mut normalized: String = raw_username
        .chars()
        .take(USERNAME_PREFIX_LEN)
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .take(NORMALIZED_LEN)
        .collect();

    while normalized.len() < NORMALIZED_LEN {
        normalized.push('0');
    }
    normalized
}

/// Read a six-character base-36 string as a number, rendered as 8 hex digits
pub fn encode_base36_to_hex(normalized: &str) -> Result<String> {
    let len = normalized.chars().count();
    if len != NORMALIZED_LEN {
        return Err(WlaterError::invalid_input(format!(
            "Input must be exactly {} characters (got {})",
            NORMALIZED_LEN, len
        )));
    }

    let mut value: u64 = 0;
    for ch in normalized.chars() {
        let digit = match ch {
            '0'..='9' | 'a'..='z' => ch.to_digit(36).map(u64::from),
            _ => None,
        }
        .ok_or_else(|| {
            WlaterError::invalid_input(format!(
                "Invalid character '{}'; only 0-9 and a-z allowed",
                ch
            ))
        })?;
        value = value * 36 + digit;
    }

    Ok(format!("{:08x}", value))
}

/// Derive the device id for a login name on a platform
///
/// Pure and deterministic: no randomness, no clock, no persisted state.
pub fn derive(raw_username: &str, host_platform: &str) -> Result<DeviceId> {
    let normalized = normalize_username(raw_username);
    let username_hex = encode_base36_to_hex(&normalized)?;
    Ok(DeviceId(format!(
        "{}{}{}",
        APP_PREFIX,
        platform_code(host_platform),
        username_hex
    )))
}

/// Name of the running platform, in the table's vocabulary
pub fn host_platform_name() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "linux" | "android" => "Linux",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "solaris" | "illumos" => "SunOS",
        "aix" => "AIX",
        other => other,
    }
}

/// Login name of the current user, from the environment
pub fn current_username() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
}

/// A derived id together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedDeviceId {
    pub system: String,
    pub username: String,
    pub normalized: String,
    pub device_id: DeviceId,
}

impl DerivedDeviceId {
    pub fn from_parts(username: &str, system: &str) -> Result<Self> {
        Ok(Self {
            system: system.to_string(),
            username: username.to_string(),
            normalized: normalize_username(username),
            device_id: derive(username, system)?,
        })
    }
}

/// Derive the id for whoever runs this process
pub fn derive_for_current_user() -> Result<DerivedDeviceId> {
    let username = current_username()
        .ok_or_else(|| WlaterError::invalid_input("Cannot determine the current username"))?;
    DerivedDeviceId::from_parts(&username, host_platform_name())
}

#[cfg(test)]
#[path = "device_id_test.rs"]
mod device_id_test;
