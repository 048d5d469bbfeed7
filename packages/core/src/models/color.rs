//! Note color palette

use crate::error::WlaterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of note colors
///
/// Serialized by name (`"RED"`, `"CERULEAN"`, ...). `DEFAULT` is the white
/// background of an uncolored note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    #[default]
    Default,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Cerulean,
    Purple,
    Pink,
    Brown,
    Gray,
}

impl Color {
    /// Every color, in palette order
    pub const ALL: [Color; 12] = [
        Color::Default,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Teal,
        Color::Blue,
        Color::Cerulean,
        Color::Purple,
        Color::Pink,
        Color::Brown,
        Color::Gray,
    ];

    /// Canonical name as exposed to RPC clients
    pub fn name(self) -> &'static str {
        match self {
            Color::Default => "DEFAULT",
            Color::Red => "RED",
            Color::Orange => "ORANGE",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Teal => "TEAL",
            Color::Blue => "BLUE",
            Color::Cerulean => "CERULEAN",
            Color::Purple => "PURPLE",
            Color::Pink => "PINK",
            Color::Brown => "BROWN",
            Color::Gray => "GRAY",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = WlaterError;

    /// Case-insensitive; also accepts the UI names `White`, `DarkBlue` and `Grey`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let alias = match upper.as_str() {
            "WHITE" => Some(Color::Default),
            "DARKBLUE" | "DARK_BLUE" => Some(Color::Cerulean),
            "GREY" => Some(Color::Gray),
            _ => None,
        };

        alias
            .or_else(|| Color::ALL.into_iter().find(|c| c.name() == upper))
            .ok_or_else(|| {
                let valid: Vec<&str> = Color::ALL.iter().map(|c| c.name()).collect();
                WlaterError::invalid_input(format!(
                    "Unknown color '{}'. Valid colors: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}
