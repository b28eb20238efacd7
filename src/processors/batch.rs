// greyform/src/processors/batch.rs
use crate::core::{
    BatchReport, EncodeOptions, FileOutcome, ImageProcessor, OverwriteDecision, OverwriteOracle,
    Result, TransformConfig, TransformError,
};
use crate::utils::collect_inputs;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

pub struct BatchProcessor {
    processor: ImageProcessor,
    show_progress: bool,
    scratch_root: Option<PathBuf>,
}

impl BatchProcessor {
    pub fn new(config: TransformConfig, options: EncodeOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            processor: ImageProcessor::new(config, options),
            show_progress: true,
            scratch_root: None,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Creates the extraction directory under `root` instead of the system
    /// temp directory.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Expands zip archives and directories among `inputs`, then processes
    /// the combined list. Extracted files are removed when this returns,
    /// whether the batch succeeded or not.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        recursive: bool,
        output_dir: &Path,
        oracle: &mut dyn OverwriteOracle,
    ) -> Result<BatchReport> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("greyform-extract-");
        let scratch = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        log::debug!("Extraction scratch directory: {}", scratch.path().display());

        let files = collect_inputs(inputs, recursive, scratch.path())?;
        self.process_files(&files, output_dir, oracle)
    }

    /// Transforms every input in order into `output_dir`.
    ///
    /// A file that cannot be read, decoded, encoded or written is recorded as
    /// failed and the batch moves on. Only an unusable output directory or an
    /// oracle refusing outright (the `fail` policy) ends the batch early.
    pub fn process_files(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        oracle: &mut dyn OverwriteOracle,
    ) -> Result<BatchReport> {
        self.prepare_output_dir(output_dir)?;

        if inputs.is_empty() {
            log::warn!("No image files to process");
            return Ok(BatchReport::default());
        }

        log::info!(
            "Processing {} images into {}",
            inputs.len(),
            output_dir.display()
        );

        let pb = self.create_progress_bar(inputs.len());
        let mut report = BatchReport::default();

        for input in inputs {
            pb.set_message(display_name(input));

            let mut suspended = SuspendedOracle {
                pb: &pb,
                inner: &mut *oracle,
            };

            match self.processor.process_file(input, output_dir, &mut suspended) {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(TransformError::OutputExists(path)) => {
                    pb.abandon();
                    return Err(TransformError::OutputExists(path));
                }
                Err(e) => {
                    log::error!("Failed to process {}: {}", input.display(), e);
                    report.outcomes.push(FileOutcome::Failed {
                        input: input.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            pb.inc(1);
        }

        pb.finish_with_message(format!(
            "{} written, {} skipped, {} failed",
            report.written_count(),
            report.skipped_count(),
            report.failures().len()
        ));

        Ok(report)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    fn prepare_output_dir(&self, output_dir: &Path) -> Result<()> {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(TransformError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        std::fs::create_dir_all(output_dir)?;

        if std::fs::metadata(output_dir)?.permissions().readonly() {
            return Err(TransformError::InvalidParameter(format!(
                "Output directory is not writable: {}",
                output_dir.display()
            )));
        }

        Ok(())
    }
}

/// Hides the progress bar while the inner oracle talks to the terminal.
struct SuspendedOracle<'a> {
    pb: &'a ProgressBar,
    inner: &'a mut dyn OverwriteOracle,
}

impl OverwriteOracle for SuspendedOracle<'_> {
    fn decide(&mut self, path: &Path) -> Result<OverwriteDecision> {
        let inner = &mut *self.inner;
        self.pb.suspend(|| inner.decide(path))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
