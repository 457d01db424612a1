//! Colors and the highlight palette.

use serde::{Deserialize, Serialize};

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// The fixed set of highlight fills offered by the settings popup.
///
/// Serialized by lowercase name (`"yellow"`), which is what the stored
/// settings object carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Orange,
    Pink,
    Green,
    Blue,
    Purple,
}

impl HighlightColor {
    /// Stored settings key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Yellow => Color::rgb(0xFF, 0xFF, 0x00),
            Self::Orange => Color::rgb(0xFF, 0xB8, 0x6C),
            Self::Pink => Color::rgb(0xFF, 0x79, 0xC6),
            Self::Green => Color::rgb(0x50, 0xFA, 0x7B),
            Self::Blue => Color::rgb(0x8B, 0xE9, 0xFD),
            Self::Purple => Color::rgb(0xBD, 0x93, 0xF9),
        }
    }
}
