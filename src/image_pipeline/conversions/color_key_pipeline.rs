use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    color_key::{ColorKeyer, KeyStats, ParallelKeyer, SerialKeyer},
    common::error::{KeyingError, Result},
    conversions::timing::PipelineTimings,
    output::{KeyingConfig, RasterWriter, StandardRasterWriter},
    raster::{ImageCrateReader, RasterImage, RasterReader},
};

/// Reads an image, keys out the configured color and writes the result.
pub struct ColorKeyPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: KeyingConfig,
}

impl ColorKeyPipeline<ImageCrateReader, StandardRasterWriter> {
    pub fn new(config: KeyingConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: StandardRasterWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> ColorKeyPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: KeyingConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(KeyingError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(KeyingError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Keys `image` with the configured parameters and keyer.
    pub fn key(&self, image: &RasterImage) -> RasterImage {
        let params = self.config.params();
        if self.config.parallel {
            ParallelKeyer.key(image, &params)
        } else {
            SerialKeyer.key(image, &params)
        }
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<KeyStats> {
        self.convert_with_timings(input_data, output)
            .map(|(stats, _)| stats)
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<(KeyStats, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!(
            target_color = %self.config.target,
            tolerance = self.config.tolerance,
            "Starting color key conversion"
        );

        let source = timings.time("decode", || {
            let _span = tracing::info_span!("decode_image").entered();
            self.reader.read_raster(input_data)
        })?;

        timings.time("validate_dimensions", || {
            let _span = tracing::info_span!("validate_dimensions",
                width = source.width,
                height = source.height
            ).entered();
            self.validate_dimensions(source.width, source.height)
        })?;

        let (keyed, stats) = timings.time("key", || {
            let _span = tracing::info_span!("color_key", parallel = self.config.parallel).entered();
            (self.key(&source), self.config.params().stats(&source))
        });

        timings.time("encode", || {
            let _span = tracing::info_span!("encode_image",
                format = ?self.config.output_format
            ).entered();
            self.writer.write_raster(&keyed, output, &self.config)
        })?;

        info!(
            width = keyed.width,
            height = keyed.height,
            keyed = stats.keyed,
            "Conversion complete: {:.1}% transparent in {:.3}ms",
            stats.keyed_ratio() * 100.0,
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((stats, timings))
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<KeyStats> {
        self.convert_file_with_timings(input_path, output_path)
            .map(|(stats, _)| stats)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<(KeyStats, PipelineTimings)> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                KeyingError::ImageLoadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // encode into memory first so a failed conversion leaves no partial file behind
        let mut encoded = Vec::new();
        let (stats, mut timings) = self.convert_with_timings(&input_data, &mut encoded)?;

        timings.time("write_output_file", || {
            let _span = tracing::info_span!("write_output_file").entered();
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        KeyingError::ImageSaveError(format!("{}: {}", parent.display(), e))
                    })?;
                }
            }
            std::fs::write(output_path, &encoded).map_err(|e| {
                KeyingError::ImageSaveError(format!("{}: {}", output_path.display(), e))
            })
        })?;

        Ok((stats, timings))
    }

    pub fn config(&self) -> &KeyingConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: KeyingConfig) {
        self.config = config;
    }
}
