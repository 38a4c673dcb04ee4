use std::path::{Path, PathBuf};

use crate::image_pipeline::output::types::KeyingConfig;

/// Derives where the keyed copy of `input` goes: next to the input, named
/// `<stem><suffix>.<ext>` with the extension of the configured output format.
pub fn output_path_for(input: &Path, config: &KeyingConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!(
        "{}{}.{}",
        stem,
        config.output_suffix,
        config.output_format.extension()
    );
    input.with_file_name(file_name)
}
