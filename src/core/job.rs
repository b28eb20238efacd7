// greyform/src/core/job.rs
use super::{Result, TransformConfig, TransformError};
use std::path::{Path, PathBuf};

/// One input file and the path its transformed image is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ImageJob {
    pub fn new(input: &Path, output_dir: &Path, config: &TransformConfig) -> Result<Self> {
        let file_name = output_file_name(input, config)?;

        Ok(Self {
            input: input.to_path_buf(),
            output: output_dir.join(file_name),
        })
    }
}

/// Derives `{stem}{colour}{resolution}{rotation}{ext}` from the input file name.
///
/// Depends only on the input's file name and `config`, so inputs sharing a
/// base name land on the same output path.
pub fn output_file_name(input: &Path, config: &TransformConfig) -> Result<String> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            TransformError::InvalidParameter(format!("Invalid file name: {}", input.display()))
        })?;

    let extension = match config.output_format.extension() {
        Some(ext) => ext.to_string(),
        None => input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .ok_or_else(|| {
                TransformError::UnsupportedFormat(format!(
                    "Cannot keep the original format of {}: no file extension",
                    input.display()
                ))
            })?,
    };

    Ok(format!(
        "{}{}{}{}{}",
        stem,
        config.color_mode.suffix(),
        config.resolution.suffix(),
        config.rotation.suffix(),
        extension
    ))
}
