//! Pipeline conversions module
//!
//! This module contains the orchestration of reading, keying and writing.

mod color_key_pipeline;
mod timing;

#[cfg(test)]
mod tests;

pub use color_key_pipeline::ColorKeyPipeline;
pub use timing::{PipelineTimings, StepTiming};
