// greyform/src/core/processor.rs
use super::{
    EncodeOptions, FileOutcome, ImageJob, OverwriteDecision, OverwriteOracle, Result,
    TransformConfig,
};
use crate::processors::{apply_color_mode, rotate, Compressor, Loader, Resizer};
use image::GrayImage;
use std::path::Path;

/// Runs one file through load, colour, resize, rotate and write.
pub struct ImageProcessor {
    config: TransformConfig,
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
}

impl ImageProcessor {
    pub fn new(config: TransformConfig, options: EncodeOptions) -> Self {
        let resizer = Resizer::new(options.filter);
        let compressor =
            Compressor::new(options.jpeg_quality).with_png_optimization(options.optimize_png);

        Self {
            config,
            loader: Loader::new(),
            resizer,
            compressor,
        }
    }

    /// Applies the colour, resolution and rotation steps to a grayscale image.
    pub fn transform(&self, image: GrayImage) -> Result<GrayImage> {
        let image = apply_color_mode(image, self.config.color_mode);
        let image = self
            .resizer
            .resize(&image, self.config.resolution, self.config.color_mode)?;
        Ok(rotate(image, self.config.rotation))
    }

    /// Transforms `input` and writes it under `output_dir`.
    ///
    /// The oracle is only asked when the derived output path already exists.
    pub fn process_file(
        &self,
        input: &Path,
        output_dir: &Path,
        oracle: &mut dyn OverwriteOracle,
    ) -> Result<FileOutcome> {
        let image = self.loader.load_grayscale(input)?;
        let image = self.transform(image)?;

        let job = ImageJob::new(input, output_dir, &self.config)?;

        if job.output.exists() {
            match oracle.decide(&job.output)? {
                OverwriteDecision::Overwrite => {
                    log::debug!("Overwriting {}", job.output.display());
                }
                OverwriteDecision::Skip => {
                    log::info!("Skipped: {}", job.output.display());
                    return Ok(FileOutcome::Skipped(job.output));
                }
            }
        }

        self.compressor.save(&image, &job.output)?;

        Ok(FileOutcome::Written(job.output))
    }
}
