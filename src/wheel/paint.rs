use crate::error::WheelError;
use derive_more::{Deref, From, Into};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

pub const MIN_COLORS: usize = 3;

/// An opaque color, written as `#rrggbb` (or `#rgb`) in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgb<u8>);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }
}

impl FromStr for Color {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

const RAINBOW_DASH: [Color; 7] = [
    Color::rgb(0xee, 0x41, 0x36),
    Color::rgb(0xf3, 0x8a, 0x2a),
    Color::rgb(0xfd, 0xe0, 0x3a),
    Color::rgb(0x5f, 0xbb, 0x46),
    Color::rgb(0x1e, 0x98, 0xd3),
    Color::rgb(0x3f, 0x4b, 0xa8),
    Color::rgb(0x8e, 0x44, 0xad),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: RAINBOW_DASH.to_vec(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, WheelError> {
        if colors.len() < MIN_COLORS {
            return Err(WheelError::InvalidConfiguration {
                found: colors.len(),
                min: MIN_COLORS,
            });
        }
        Ok(Self { colors })
    }

    /// Like [`Palette::new`], substituting the default palette for a short one.
    pub fn or_default(colors: Vec<Color>) -> Self {
        Self::new(colors).unwrap_or_else(|e| {
            log::warn!("{}; using the default palette", e);
            Self::default()
        })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of segment `index` on a wheel of `item_count` segments.
    ///
    /// Colors cycle through the palette. When the closing segment would repeat the color of
    /// segment 0 it takes the middle palette color instead.
    pub fn segment_color(&self, index: usize, item_count: usize) -> Color {
        let len = self.colors.len();
        let i = if index + 1 == item_count && index % len == 0 {
            len / 2
        } else {
            index % len
        };
        self.colors[i]
    }
}
