// greyform/src/core/mod.rs
pub mod job;
pub mod overwrite;
pub mod processor;

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub use job::ImageJob;
pub use overwrite::{OverwriteDecision, OverwriteOracle, OverwritePolicy, Prompter};
pub use processor::ImageProcessor;

/// Edge length the 512 resolution modes scale to.
pub const TARGET_DIMENSION: u32 = 512;

/// Intensities strictly above this become white in black-and-white mode.
pub const BW_THRESHOLD: u8 = 128;

/// Largest width or height accepted on load and produced by a resize.
pub const MAX_DIMENSION: u32 = 100_000;

/// Largest pixel count a resize may produce (one byte per pixel).
pub const MAX_PIXELS: u64 = 1 << 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Original,
    /// Longest side becomes 512px.
    #[value(name = "max512")]
    #[serde(rename = "max512")]
    MaxDimension512,
    /// Shortest side becomes 512px.
    #[value(name = "min512")]
    #[serde(rename = "min512")]
    MinDimension512,
}

impl Resolution {
    pub fn suffix(self) -> &'static str {
        match self {
            Resolution::Original => "",
            Resolution::MaxDimension512 => "_max512",
            Resolution::MinDimension512 => "_min512",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Original,
    Png,
    #[value(alias = "jpeg")]
    #[serde(alias = "jpeg")]
    Jpg,
    Bmp,
    #[value(alias = "tif")]
    #[serde(alias = "tif")]
    Tiff,
    Webp,
}

impl OutputFormat {
    /// Extension with its leading dot, `None` when the input's own is kept.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            OutputFormat::Original => None,
            OutputFormat::Png => Some(".png"),
            OutputFormat::Jpg => Some(".jpg"),
            OutputFormat::Bmp => Some(".bmp"),
            OutputFormat::Tiff => Some(".tiff"),
            OutputFormat::Webp => Some(".webp"),
        }
    }
}

/// Clockwise rotation applied after resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(try_from = "u16")]
pub enum Rotation {
    #[default]
    #[value(name = "0")]
    None,
    #[value(name = "90")]
    Clockwise90,
    #[value(name = "180")]
    Rotate180,
    #[value(name = "270")]
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    pub fn suffix(self) -> String {
        match self {
            Rotation::None => String::new(),
            other => format!("_{}d", other.degrees()),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = TransformError;

    fn try_from(degrees: u16) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Clockwise90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Clockwise270),
            other => Err(TransformError::InvalidParameter(format!(
                "Rotation must be 0, 90, 180 or 270 degrees, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    #[value(alias = "greyscale")]
    #[serde(alias = "greyscale")]
    Grayscale,
    #[value(name = "bw", alias = "black-and-white")]
    #[serde(alias = "bw")]
    BlackAndWhite,
}

impl ColorMode {
    pub fn suffix(self) -> &'static str {
        match self {
            ColorMode::Grayscale => "_greyscale",
            ColorMode::BlackAndWhite => "_bw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
    Lanczos3,
}

/// What to do to every image of a batch. Built once, never mutated by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformConfig {
    pub resolution: Resolution,
    pub output_format: OutputFormat,
    pub rotation: Rotation,
    pub color_mode: ColorMode,
}

/// How transformed images are encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    pub jpeg_quality: u8,
    pub optimize_png: bool,
    pub filter: ResizeAlgorithm,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            optimize_png: false,
            filter: ResizeAlgorithm::Bicubic,
        }
    }
}

impl EncodeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(TransformError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
    Failed { input: PathBuf, reason: String },
}

/// Per-file outcomes of one batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Written(path) => Some(path),
            _ => None,
        })
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, FileOutcome::Skipped(_)))
            .count()
    }

    pub fn failures(&self) -> Vec<(&PathBuf, &str)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                FileOutcome::Failed { input, reason } => Some((input, reason.as_str())),
                _ => None,
            })
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Output already exists: {}", .0.display())]
    OutputExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, TransformError>;
