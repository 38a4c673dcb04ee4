use tracing::debug;

use crate::image_pipeline::color_key::types::{ColorKeyParams, TargetColor};
use crate::image_pipeline::raster::{ChannelLayout, RasterImage};

pub trait ColorKeyer {
    /// Returns an RGBA copy of `image` with every pixel matching `params`
    /// made fully transparent. The input is never modified.
    fn key(&self, image: &RasterImage, params: &ColorKeyParams) -> RasterImage;
}

/// Makes every pixel within `tolerance` of `target` fully transparent.
///
/// Color channels are kept as they were, so keying an already keyed image
/// with the same parameters gives back the same image. Pixels that do not
/// match keep their alpha (255 when the input has no alpha channel).
pub fn make_transparent(image: &RasterImage, target: TargetColor, tolerance: u8) -> RasterImage {
    SerialKeyer.key(image, &ColorKeyParams::new(target, tolerance))
}

pub struct SerialKeyer;

impl ColorKeyer for SerialKeyer {
    fn key(&self, image: &RasterImage, params: &ColorKeyParams) -> RasterImage {
        debug_assert_eq!(image.data.len(), image.expected_len(), "pixel buffer does not match dimensions");
        debug!(
            "Keying {}x{} image on {} (tolerance {})",
            image.width, image.height, params.target, params.tolerance
        );

        let mut data = Vec::with_capacity(image.pixel_count() * 4);
        for sample in image.data.chunks_exact(image.layout.channels()) {
            data.extend_from_slice(&params.key_pixel(sample));
        }

        RasterImage {
            width: image.width,
            height: image.height,
            layout: ChannelLayout::Rgba,
            data,
        }
    }
}
