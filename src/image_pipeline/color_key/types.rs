//! Color keying parameter types

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use thiserror::Error;

use crate::image_pipeline::raster::RasterImage;

/// Reference color whose neighbourhood becomes transparent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TargetColor {
    pub const WHITE: TargetColor = TargetColor::new(255, 255, 255);
    /// Warm off-white paper background
    pub const PAPER: TargetColor = TargetColor::new(255, 251, 240);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for TargetColor {
    fn default() -> Self {
        TargetColor::PAPER
    }
}

impl fmt::Display for TargetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("expected #RRGGBB, RRGGBB or R,G,B, got {0:?}")]
    Malformed(String),

    #[error("channel value {0:?} is not in 0..=255")]
    ChannelOutOfRange(String),
}

impl FromStr for TargetColor {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB`, `RRGGBB` or a decimal `R,G,B` triple.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains(',') {
            let channels: Vec<&str> = s.split(',').map(str::trim).collect();
            if channels.len() != 3 {
                return Err(ParseColorError::Malformed(s.to_string()));
            }
            let mut rgb = [0u8; 3];
            for (slot, text) in rgb.iter_mut().zip(&channels) {
                *slot = text.parse().map_err(|e: ParseIntError| match e.kind() {
                    IntErrorKind::PosOverflow => ParseColorError::ChannelOutOfRange(text.to_string()),
                    _ => ParseColorError::Malformed(s.to_string()),
                })?;
            }
            return Ok(TargetColor::new(rgb[0], rgb[1], rgb[2]));
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::Malformed(s.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(TargetColor::new(r, g, b)),
            _ => Err(ParseColorError::Malformed(s.to_string())),
        }
    }
}

/// Target color plus the per-channel tolerance around it.
///
/// A pixel matches when each of its R, G and B channels lies within
/// `tolerance` of the target (inclusive). The matched region is a cube in
/// RGB space, not a sphere. Alpha never takes part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKeyParams {
    pub target: TargetColor,
    pub tolerance: u8,
}

impl Default for ColorKeyParams {
    fn default() -> Self {
        Self {
            target: TargetColor::default(),
            tolerance: 10,
        }
    }
}

impl ColorKeyParams {
    pub fn new(target: TargetColor, tolerance: u8) -> Self {
        Self { target, tolerance }
    }

    #[inline]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        r.abs_diff(self.target.r) <= self.tolerance
            && g.abs_diff(self.target.g) <= self.tolerance
            && b.abs_diff(self.target.b) <= self.tolerance
    }

    /// Keys a single 3- or 4-sample pixel, returning it as RGBA.
    #[inline]
    pub fn key_pixel(&self, sample: &[u8]) -> [u8; 4] {
        let (r, g, b) = (sample[0], sample[1], sample[2]);
        if self.matches(r, g, b) {
            [r, g, b, 0]
        } else {
            [r, g, b, sample.get(3).copied().unwrap_or(u8::MAX)]
        }
    }

    /// Counts how many pixels of `image` this key would make transparent.
    pub fn stats(&self, image: &RasterImage) -> KeyStats {
        let keyed = image
            .pixels()
            .filter(|[r, g, b, _]| self.matches(*r, *g, *b))
            .count();
        KeyStats {
            keyed,
            total: image.pixel_count(),
        }
    }
}

/// Keyed pixel count for one transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStats {
    pub keyed: usize,
    pub total: usize,
}

impl KeyStats {
    pub fn keyed_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.keyed as f64 / self.total as f64
        }
    }
}
