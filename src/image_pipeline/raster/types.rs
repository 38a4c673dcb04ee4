//! In-memory raster image types

use crate::image_pipeline::common::error::{KeyingError, Result};

/// Sample layout of a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Three samples per pixel, implicitly fully opaque
    Rgb,
    /// Four samples per pixel, straight alpha last
    Rgba,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::Rgba)
    }
}

/// Decoded 8-bit raster image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Sample layout of `data`
    pub layout: ChannelLayout,
    /// Row-major interleaved samples [R, G, B, (A), R, G, B, (A), ...]
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Wraps an interleaved sample buffer, checking that it covers exactly
    /// `width * height` pixels of the given layout.
    pub fn new(width: usize, height: usize, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(layout.channels()))
            .ok_or(KeyingError::InvalidDimensions(width, height))?;

        if data.len() != expected {
            return Err(KeyingError::InvalidBufferLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ChannelLayout::Rgb, data)
    }

    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ChannelLayout::Rgba, data)
    }

    /// Builds an RGBA image from a list of pixels in row-major order.
    pub fn from_pixels(width: usize, height: usize, pixels: &[[u8; 4]]) -> Result<Self> {
        Self::from_rgba(width, height, pixels.concat())
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of samples `data` must hold for the declared size and layout.
    pub fn expected_len(&self) -> usize {
        self.pixel_count() * self.layout.channels()
    }

    /// Returns pixel `(x, y)` as RGBA. RGB images report alpha 255.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.layout.channels();
        let offset = (y * self.width + x) * channels;
        Some(rgba_of(&self.data[offset..offset + channels]))
    }

    /// Iterates over every pixel as RGBA in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data.chunks_exact(self.layout.channels()).map(rgba_of)
    }

    /// Widens the image to RGBA, filling a missing alpha channel with 255.
    pub fn to_rgba(&self) -> RasterImage {
        match self.layout {
            ChannelLayout::Rgba => self.clone(),
            ChannelLayout::Rgb => RasterImage {
                width: self.width,
                height: self.height,
                layout: ChannelLayout::Rgba,
                data: self.pixels().flatten().collect(),
            },
        }
    }
}

fn rgba_of(sample: &[u8]) -> [u8; 4] {
    [
        sample[0],
        sample[1],
        sample[2],
        sample.get(3).copied().unwrap_or(u8::MAX),
    ]
}

impl From<image::RgbaImage> for RasterImage {
    fn from(buffer: image::RgbaImage) -> Self {
        RasterImage {
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            layout: ChannelLayout::Rgba,
            data: buffer.into_raw(),
        }
    }
}

impl From<image::RgbImage> for RasterImage {
    fn from(buffer: image::RgbImage) -> Self {
        RasterImage {
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            layout: ChannelLayout::Rgb,
            data: buffer.into_raw(),
        }
    }
}
