//! Image processing pipeline module
//!
//! This module provides color-key background removal: an image model and
//! reader, the keying transform itself, PNG/TIFF output, and the
//! orchestration that ties them together.

pub mod raster;
pub mod color_key;
pub mod output;
pub mod conversions;
pub mod session;
pub mod common;

pub use common::{
    KeyingError,
    Result,
};

pub use raster::{
    ChannelLayout,
    RasterImage,
    RasterReader,
    ImageCrateReader,
};

pub use color_key::{
    make_transparent,
    ColorKeyer,
    ColorKeyParams,
    KeyStats,
    ParallelKeyer,
    SerialKeyer,
    TargetColor,
};

pub use output::{
    output_path_for,
    KeyingConfig,
    KeyingConfigBuilder,
    OutputFormat,
    RasterWriter,
    StandardRasterWriter,
    TiffCompression,
};

pub use conversions::{
    ColorKeyPipeline,
    PipelineTimings,
};

pub use session::{KeyingSession, ParameterChange};
