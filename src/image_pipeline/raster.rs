//! Raster image module
//!
//! This module provides the in-memory image model and format-agnostic reading.

mod reader;
mod image_crate_reader;
pub mod types;

pub use reader::RasterReader;
pub use image_crate_reader::ImageCrateReader;
pub use types::{ChannelLayout, RasterImage};
