//! Keying and output configuration types

use crate::image_pipeline::color_key::{ColorKeyParams, TargetColor};

/// Container format of the keyed image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG with straight RGBA
    Png,
    /// TIFF with an RGBA8 strip layout
    Tiff,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Configuration for a load, key and save run
#[derive(Debug, Clone)]
pub struct KeyingConfig {
    /// Color to key out
    pub target: TargetColor,
    /// Maximum per-channel difference that still counts as a match
    pub tolerance: u8,
    /// Container format of the output
    pub output_format: OutputFormat,
    /// Compression method, TIFF output only
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing), TIFF output only
    pub predictor: Option<u16>,
    /// Whether to validate image dimensions before keying
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    /// Key rows on the rayon pool instead of the calling thread
    pub parallel: bool,
    /// Appended to the input file stem when deriving an output path
    pub output_suffix: String,
}

impl Default for KeyingConfig {
    fn default() -> Self {
        let params = ColorKeyParams::default();
        Self {
            target: params.target,
            tolerance: params.tolerance,
            output_format: OutputFormat::Png,
            compression: TiffCompression::DeflateBalanced,
            predictor: None,
            validate_dimensions: true,
            max_dimension: Some(50000),
            parallel: false,
            output_suffix: "_transparent".to_string(),
        }
    }
}

impl KeyingConfig {
    pub fn builder() -> KeyingConfigBuilder {
        KeyingConfigBuilder::default()
    }

    pub fn params(&self) -> ColorKeyParams {
        ColorKeyParams::new(self.target, self.tolerance)
    }
}

/// Builder for KeyingConfig
#[derive(Default)]
pub struct KeyingConfigBuilder {
    target: Option<TargetColor>,
    tolerance: Option<u8>,
    output_format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    parallel: Option<bool>,
    output_suffix: Option<String>,
}

impl KeyingConfigBuilder {
    pub fn target(mut self, target: TargetColor) -> Self {
        self.target = Some(target);
        self
    }

    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = Some(suffix.into());
        self
    }

    pub fn build(self) -> KeyingConfig {
        let default = KeyingConfig::default();
        KeyingConfig {
            target: self.target.unwrap_or(default.target),
            tolerance: self.tolerance.unwrap_or(default.tolerance),
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            parallel: self.parallel.unwrap_or(default.parallel),
            output_suffix: self.output_suffix.unwrap_or(default.output_suffix),
        }
    }
}
