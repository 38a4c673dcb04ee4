use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::image_pipeline::color_key::TargetColor;
use crate::image_pipeline::common::error::{KeyingError, Result};
use crate::image_pipeline::conversions::ColorKeyPipeline;
use crate::image_pipeline::output::{KeyingConfig, RasterWriter};
use crate::image_pipeline::raster::{RasterImage, RasterReader};

struct MockReader {
    should_fail: bool,
    mock_data: Option<RasterImage>,
}

impl RasterReader for MockReader {
    fn read_raster(&self, _data: &[u8]) -> Result<RasterImage> {
        if self.should_fail {
            return Err(KeyingError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| RasterImage {
            width: 10,
            height: 10,
            layout: crate::image_pipeline::raster::ChannelLayout::Rgba,
            data: vec![0u8; 10 * 10 * 4],
        }))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<RasterImage>>>,
}

impl RasterWriter for MockWriter {
    fn write_raster(&self, image: &RasterImage, _output: &mut dyn Write, _config: &KeyingConfig) -> Result<()> {
        if self.should_fail {
            return Err(KeyingError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn pipeline_with(
    mock_data: Option<RasterImage>,
    config: KeyingConfig,
) -> (ColorKeyPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<RasterImage>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: false, mock_data };
    let writer = MockWriter { should_fail: false, written_data: written.clone() };
    (ColorKeyPipeline::with_custom(reader, writer, config), written)
}

#[test]
fn test_config_builder() {
    let config = KeyingConfig::builder()
        .target(TargetColor::WHITE)
        .tolerance(14)
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .parallel(true)
        .build();

    assert_eq!(config.target, TargetColor::WHITE);
    assert_eq!(config.tolerance, 14);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
    assert!(config.parallel);
    assert_eq!(config.output_suffix, "_transparent");
}

#[test]
fn test_successful_conversion_keys_pixels() {
    let source = RasterImage::from_pixels(2, 1, &[[255, 251, 240, 255], [0, 0, 0, 255]]).unwrap();
    let (pipeline, written) = pipeline_with(Some(source), KeyingConfig::default());

    let mut output = Vec::new();
    let stats = pipeline.convert(b"fake image data", &mut output).unwrap();

    assert_eq!(stats.keyed, 1);
    assert_eq!(stats.total, 2);
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].data, vec![255, 251, 240, 0, 0, 0, 0, 255]);
}

#[test]
fn test_parallel_config_gives_same_output() {
    let source = RasterImage::from_rgb(
        4,
        3,
        (0..36).map(|i| (240 + i % 16) as u8).collect(),
    )
    .unwrap();

    let (serial, serial_written) = pipeline_with(Some(source.clone()), KeyingConfig::default());
    let (parallel, parallel_written) = pipeline_with(
        Some(source),
        KeyingConfig::builder().parallel(true).build(),
    );

    serial.convert(b"", &mut Vec::new()).unwrap();
    parallel.convert(b"", &mut Vec::new()).unwrap();

    assert_eq!(*serial_written.lock().unwrap(), *parallel_written.lock().unwrap());
}

#[test]
fn test_reader_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: true, mock_data: None };
    let writer = MockWriter { should_fail: false, written_data: written.clone() };

    let pipeline = ColorKeyPipeline::with_custom(reader, writer, KeyingConfig::default());

    let result = pipeline.convert(b"fake image data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), KeyingError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: false, mock_data: None };
    let writer = MockWriter { should_fail: true, written_data: written };

    let pipeline = ColorKeyPipeline::with_custom(reader, writer, KeyingConfig::default());

    let result = pipeline.convert(b"fake image data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), KeyingError::EncodeError(_)));
}

#[test]
fn test_dimension_validation_failure() {
    let source = RasterImage::from_rgba(300, 2, vec![0u8; 300 * 2 * 4]).unwrap();
    let config = KeyingConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(256))
        .build();
    let (pipeline, written) = pipeline_with(Some(source), config);

    let result = pipeline.convert(b"fake image data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), KeyingError::InvalidDimensions(300, 2)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_empty_image_rejected_when_validating() {
    let source = RasterImage::from_rgba(0, 0, Vec::new()).unwrap();
    let (pipeline, _) = pipeline_with(Some(source), KeyingConfig::default());

    let result = pipeline.convert(b"fake image data", &mut Vec::new());

    assert!(matches!(result.unwrap_err(), KeyingError::InvalidDimensions(0, 0)));
}

#[test]
fn test_dimension_validation_disabled() {
    let source = RasterImage::from_rgba(0, 0, Vec::new()).unwrap();
    let config = KeyingConfig::builder().validate_dimensions(false).build();
    let (pipeline, written) = pipeline_with(Some(source), config);

    let stats = pipeline.convert(b"fake image data", &mut Vec::new()).unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_timings_cover_every_step() {
    let (pipeline, _) = pipeline_with(None, KeyingConfig::default());

    let (_, timings) = pipeline
        .convert_with_timings(b"fake image data", &mut Vec::new())
        .unwrap();

    let names: Vec<_> = timings.steps().iter().map(|s| s.name).collect();
    assert_eq!(names, ["decode", "validate_dimensions", "key", "encode"]);
}

#[test]
fn test_set_config_changes_target() {
    let source = RasterImage::from_pixels(1, 1, &[[255, 255, 255, 255]]).unwrap();
    let (mut pipeline, written) = pipeline_with(Some(source), KeyingConfig::default());

    pipeline.set_config(KeyingConfig::builder().target(TargetColor::WHITE).tolerance(0).build());
    pipeline.convert(b"", &mut Vec::new()).unwrap();

    assert_eq!(pipeline.config().target, TargetColor::WHITE);
    assert_eq!(written.lock().unwrap()[0].data, vec![255, 255, 255, 0]);
}
