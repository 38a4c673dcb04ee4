//! Output module
//!
//! This module encodes keyed images (PNG or TIFF) and decides where they are written.

mod writer;
mod standard_writer;
mod path;
pub mod types;

pub use writer::RasterWriter;
pub use standard_writer::StandardRasterWriter;
pub use path::output_path_for;
pub use types::{KeyingConfig, KeyingConfigBuilder, OutputFormat, TiffCompression};
