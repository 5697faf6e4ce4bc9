use palette::Srgb;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

pub const DEFAULT_PALETTE: [Srgb<u8>; 12] = [
    Srgb::new(0xff, 0x6b, 0x6b),
    Srgb::new(0x4e, 0xcd, 0xc4),
    Srgb::new(0x45, 0xb7, 0xd1),
    Srgb::new(0xf9, 0xca, 0x24),
    Srgb::new(0x6c, 0x5c, 0xe7),
    Srgb::new(0xa2, 0x9b, 0xfe),
    Srgb::new(0xfd, 0x79, 0xa8),
    Srgb::new(0x00, 0xb8, 0x94),
    Srgb::new(0xe1, 0x70, 0x55),
    Srgb::new(0x09, 0x84, 0xe3),
    Srgb::new(0xfd, 0xcb, 0x6e),
    Srgb::new(0x2d, 0x34, 0x36),
];

/// Text colour that stays readable on top of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LabelTone {
    Dark,
    Light,
}

impl LabelTone {
    pub fn for_background(color: Srgb<u8>) -> Self {
        if luminance(color) > 0.5 {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn color(&self) -> Srgb<u8> {
        match self {
            Self::Dark => Srgb::new(0x1a, 0x1a, 0x1a),
            Self::Light => Srgb::new(0xff, 0xff, 0xff),
        }
    }
}

/// Perceived brightness in `[0, 1]`.
pub fn luminance(color: Srgb<u8>) -> f64 {
    let c: Srgb<f64> = color.into_format();
    0.299 * c.red + 0.587 * c.green + 0.114 * c.blue
}

pub fn color_for(index: usize, palette: &[Srgb<u8>]) -> Srgb<u8> {
    let palette = if palette.is_empty() {
        &DEFAULT_PALETTE[..]
    } else {
        palette
    };
    palette[index % palette.len()]
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Expected a colour like #rrggbb, got {0:?}")]
    Format(String),
}

/// `#rrggbb` colour as it appears in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgb<u8>);

impl From<HexColor> for Srgb<u8> {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError::Format(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel =
            |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        Ok(Self(Srgb::new(channel(0)?, channel(2)?, channel(4)?)))
    }
}
