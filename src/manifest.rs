// greyform/src/manifest.rs
use crate::core::{
    ColorMode, EncodeOptions, OutputFormat, OverwritePolicy, ResizeAlgorithm, Resolution, Result,
    Rotation, TransformConfig, TransformError,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A batch described in TOML. Every key is optional; command-line flags win.
///
/// ```toml
/// output = "out"
/// inputs = ["a.png", "photos.zip"]
/// color = "black-and-white"
/// resolution = "max512"
/// rotation = 90
/// format = "png"
/// on_conflict = "skip"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub color: Option<ColorMode>,
    pub resolution: Option<Resolution>,
    pub rotation: Option<Rotation>,
    pub format: Option<OutputFormat>,
    pub on_conflict: Option<OverwritePolicy>,
    pub quality: Option<u8>,
    pub optimize_png: Option<bool>,
    pub recursive: Option<bool>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Reading manifest {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let mut manifest = Self::parse(&text)?;

        // Relative paths are taken from the manifest's own directory.
        if let Some(base) = path.parent() {
            manifest.inputs = manifest
                .inputs
                .into_iter()
                .map(|input| base.join(input))
                .collect();
            manifest.output = manifest.output.map(|output| base.join(output));
        }

        Ok(manifest)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Layers `flags` over this manifest. Set flags replace manifest values,
    /// flag inputs are appended after the manifest's.
    pub fn merge(mut self, flags: Manifest) -> Manifest {
        self.inputs.extend(flags.inputs);

        Manifest {
            inputs: self.inputs,
            output: flags.output.or(self.output),
            color: flags.color.or(self.color),
            resolution: flags.resolution.or(self.resolution),
            rotation: flags.rotation.or(self.rotation),
            format: flags.format.or(self.format),
            on_conflict: flags.on_conflict.or(self.on_conflict),
            quality: flags.quality.or(self.quality),
            optimize_png: flags.optimize_png.or(self.optimize_png),
            recursive: flags.recursive.or(self.recursive),
        }
    }

    /// Fills unset values with defaults. An output directory and at least
    /// one input are required.
    pub fn into_job(self, filter: ResizeAlgorithm) -> Result<Job> {
        let output = self.output.ok_or_else(|| {
            TransformError::InvalidParameter(
                "No output directory given (use --output or `output` in the manifest)".to_string(),
            )
        })?;

        if self.inputs.is_empty() {
            return Err(TransformError::InvalidParameter("No inputs given".to_string()));
        }

        Ok(Job {
            inputs: self.inputs,
            output,
            config: TransformConfig {
                resolution: self.resolution.unwrap_or_default(),
                output_format: self.format.unwrap_or_default(),
                rotation: self.rotation.unwrap_or_default(),
                color_mode: self.color.unwrap_or_default(),
            },
            options: EncodeOptions {
                jpeg_quality: self
                    .quality
                    .unwrap_or(EncodeOptions::default().jpeg_quality),
                optimize_png: self.optimize_png.unwrap_or(false),
                filter,
            },
            policy: self.on_conflict.unwrap_or_default(),
            recursive: self.recursive.unwrap_or(false),
        })
    }
}

/// A fully resolved batch, ready for [`crate::BatchProcessor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub config: TransformConfig,
    pub options: EncodeOptions,
    pub policy: OverwritePolicy,
    pub recursive: bool,
}
