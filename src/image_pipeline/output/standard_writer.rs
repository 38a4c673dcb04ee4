use std::io::{Cursor, Write};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{colortype, Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::common::error::{KeyingError, Result};
use crate::image_pipeline::output::types::{KeyingConfig, OutputFormat, TiffCompression};
use crate::image_pipeline::output::writer::RasterWriter;
use crate::image_pipeline::raster::RasterImage;

/// Writes RGBA output as PNG or TIFF depending on `KeyingConfig::output_format`.
pub struct StandardRasterWriter;

impl RasterWriter for StandardRasterWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write, config: &KeyingConfig) -> Result<()> {
        debug!(
            "Encoding {:?} image: {}x{}",
            config.output_format, image.width, image.height
        );

        let widened;
        let rgba = if image.layout.has_alpha() {
            image
        } else {
            widened = image.to_rgba();
            &widened
        };

        let (width, height) = encoder_dimensions(rgba)?;
        let buffer = match config.output_format {
            OutputFormat::Png => encode_png(rgba, width, height)?,
            OutputFormat::Tiff => encode_tiff(rgba, width, height, config)?,
        };

        output.write_all(&buffer)?;

        debug!("Encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

fn encoder_dimensions(image: &RasterImage) -> Result<(u32, u32)> {
    match (u32::try_from(image.width), u32::try_from(image.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(KeyingError::InvalidDimensions(image.width, image.height)),
    }
}

fn encode_png(image: &RasterImage, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(&image.data, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| KeyingError::EncodeError(e.to_string()))?;
    Ok(buffer)
}

fn encode_tiff(image: &RasterImage, width: u32, height: u32, config: &KeyingConfig) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();

    let compression = match config.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    };

    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| KeyingError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<colortype::RGBA8>(width, height, &image.data)
            .map_err(|e| KeyingError::EncodeError(e.to_string()))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_sample() -> RasterImage {
        RasterImage::from_pixels(2, 1, &[[255, 251, 240, 0], [0, 0, 0, 255]]).unwrap()
    }

    #[test]
    fn test_png_keeps_alpha() {
        let mut output = Vec::new();
        StandardRasterWriter
            .write_raster(&keyed_sample(), &mut output, &KeyingConfig::default())
            .unwrap();

        let decoded = image::load_from_memory_with_format(&output, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.into_raw(), keyed_sample().data);
    }

    #[test]
    fn test_tiff_with_each_compression() {
        for compression in [
            TiffCompression::None,
            TiffCompression::Lzw,
            TiffCompression::DeflateFast,
            TiffCompression::DeflateBest,
        ] {
            let config = KeyingConfig::builder()
                .output_format(OutputFormat::Tiff)
                .compression(compression)
                .predictor((compression != TiffCompression::None).then_some(2))
                .build();
            let mut output = Vec::new();
            StandardRasterWriter
                .write_raster(&keyed_sample(), &mut output, &config)
                .unwrap();

            let mut decoder = tiff::decoder::Decoder::new(Cursor::new(output)).unwrap();
            assert_eq!(decoder.dimensions().unwrap(), (2, 1));
            match decoder.read_image().unwrap() {
                tiff::decoder::DecodingResult::U8(data) => assert_eq!(data, keyed_sample().data),
                other => panic!("unexpected sample type: {:?}", std::mem::discriminant(&other)),
            }
        }
    }

    #[test]
    fn test_rgb_input_is_written_opaque() {
        let image = RasterImage::from_rgb(1, 1, vec![1, 2, 3]).unwrap();
        let mut output = Vec::new();
        StandardRasterWriter
            .write_raster(&image, &mut output, &KeyingConfig::default())
            .unwrap();

        let decoded = image::load_from_memory(&output).unwrap().to_rgba8();
        assert_eq!(decoded.into_raw(), vec![1, 2, 3, 255]);
    }
}
