//! Color type used by styles and output backends.
//!
//! Colors are written in figure configs as `#rrggbb` or `#rrggbbaa` hex strings,
//! the same notation the report style uses (`#0000ff` markers).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Color of a ROOT palette index, as written in `#color[n]{...}` labels.
    ///
    /// Covers the eight basic indices and the named base colors (`kRed` = 632,
    /// `kGreen` = 416, `kBlue` = 600, ...). Shaded offsets such as `kBlue+2`
    /// are not resolved.
    #[must_use]
    pub const fn from_root_index(index: u32) -> Option<Self> {
        let color = match index {
            0 => Self::WHITE,
            1 => Self::BLACK,
            2 | 632 => Self::RED,
            3 | 416 => Self::GREEN,
            4 | 600 => Self::BLUE,
            5 | 400 => Self::rgb(255, 255, 0),
            6 | 616 => Self::rgb(255, 0, 255),
            7 | 432 => Self::rgb(0, 255, 255),
            920 => Self::rgb(204, 204, 204),
            _ => return None,
        };
        Some(color)
    }

    /// CSS color string (`rgb(...)`, or `rgba(...)` when translucent).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.trim())
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
