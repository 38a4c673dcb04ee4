use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::color_key::keyer::ColorKeyer;
use crate::image_pipeline::color_key::types::ColorKeyParams;
use crate::image_pipeline::raster::{ChannelLayout, RasterImage};

/// Keys rows concurrently on the global rayon pool.
///
/// No pixel depends on any other, so the output is identical to
/// [`SerialKeyer`](super::SerialKeyer) regardless of scheduling.
pub struct ParallelKeyer;

impl ColorKeyer for ParallelKeyer {
    fn key(&self, image: &RasterImage, params: &ColorKeyParams) -> RasterImage {
        debug_assert_eq!(image.data.len(), image.expected_len(), "pixel buffer does not match dimensions");
        let mut data = vec![0u8; image.pixel_count() * 4];

        // zero-sized chunks would panic
        if image.width > 0 && image.height > 0 {
            debug!(
                "Keying {} rows across {} threads",
                image.height,
                rayon::current_num_threads()
            );

            let src_row = image.width * image.layout.channels();
            data.par_chunks_mut(image.width * 4)
                .zip(image.data.par_chunks(src_row))
                .for_each(|(out_row, in_row)| {
                    for (out, sample) in out_row
                        .chunks_exact_mut(4)
                        .zip(in_row.chunks_exact(image.layout.channels()))
                    {
                        out.copy_from_slice(&params.key_pixel(sample));
                    }
                });
        }

        RasterImage {
            width: image.width,
            height: image.height,
            layout: ChannelLayout::Rgba,
            data,
        }
    }
}
