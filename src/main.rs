use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use chroma_key_rs::image_pipeline::{
    output_path_for, ColorKeyPipeline, KeyingConfig, KeyingError, OutputFormat, TargetColor,
    TiffCompression,
};
use chroma_key_rs::logger;

/// Make pixels near a reference color transparent
#[derive(Parser)]
#[command(name = "chroma-key")]
#[command(version)]
struct Cli {
    /// Image to key (PNG, JPEG, BMP or TIFF)
    input: Option<PathBuf>,

    /// Output file. Defaults to the input path with the suffix appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Color to remove, as #RRGGBB or R,G,B
    #[arg(short, long, default_value = "#FFFBF0")]
    target: TargetColor,

    /// Largest per-channel difference that still counts as a match
    #[arg(long, default_value_t = 10)]
    tolerance: u8,

    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// TIFF compression
    #[arg(long, value_enum, default_value_t = Compression::Deflate)]
    compression: Compression,

    /// Suffix added to the input file name when --output is not given
    #[arg(long, default_value = "_transparent")]
    suffix: String,

    /// Key rows on all cores
    #[arg(long)]
    parallel: bool,

    /// Log how long each step took
    #[arg(long)]
    timings: bool,

    /// Debug logging for this tool (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Tiff,
}

#[derive(Clone, Copy, ValueEnum)]
enum Compression {
    None,
    Lzw,
    Deflate,
}

impl Cli {
    fn config(&self) -> KeyingConfig {
        KeyingConfig::builder()
            .target(self.target)
            .tolerance(self.tolerance)
            .output_format(match self.format {
                Format::Png => OutputFormat::Png,
                Format::Tiff => OutputFormat::Tiff,
            })
            .compression(match self.compression {
                Compression::None => TiffCompression::None,
                Compression::Lzw => TiffCompression::Lzw,
                Compression::Deflate => TiffCompression::DeflateBalanced,
            })
            .output_suffix(self.suffix.clone())
            .parallel(self.parallel)
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = cli.config();

    let Some(input) = cli.input.as_deref() else {
        error!("{}", KeyingError::UserCancelled);
        std::process::exit(1);
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(input, &config));

    let pipeline = ColorKeyPipeline::new(config);
    info!(
        "Keying {} within {} of {}",
        input.display(),
        pipeline.config().tolerance,
        pipeline.config().target
    );

    let (_, timings) = pipeline
        .convert_file_with_timings(input, &output)
        .with_context(|| format!("failed to key {}", input.display()))?;
    if cli.timings {
        timings.log_summary();
    }

    info!("Saved {}", output.display());
    Ok(())
}
