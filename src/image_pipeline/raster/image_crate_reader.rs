//! Raster reader backed by the `image` crate.
//!
//! Handles the everyday formats a user picks from a file dialog (PNG, JPEG,
//! BMP, TIFF). The format is guessed from the leading bytes rather than the
//! file extension, so a mislabeled file still decodes.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::image_pipeline::common::error::{KeyingError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::RasterImage;

pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    /// Decodes `data` into an 8-bit raster.
    ///
    /// Images that carry alpha come back as RGBA and everything else as RGB.
    /// Grayscale and 16-bit sources are narrowed to 8-bit color.
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding image, {} bytes", data.len());

        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| KeyingError::UnsupportedFormat("unrecognized image signature".to_string()))?;

        let decoded = reader
            .decode()
            .map_err(|e| KeyingError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded {:?} image: {}x{} ({:?})",
            format,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        Ok(to_raster(decoded))
    }
}

fn to_raster(decoded: DynamicImage) -> RasterImage {
    match decoded {
        DynamicImage::ImageRgba8(buffer) => buffer.into(),
        DynamicImage::ImageRgb8(buffer) => buffer.into(),
        other if other.color().has_alpha() => other.to_rgba8().into(),
        other => other.to_rgb8().into(),
    }
}
