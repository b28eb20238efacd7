mod cli;
mod core;
mod manifest;
mod processors;
mod utils;

pub use cli::{Cli, Commands};
pub use crate::core::{
    BatchReport, ColorMode, EncodeOptions, FileOutcome, ImageJob, ImageProcessor, OutputFormat,
    OverwriteDecision, OverwriteOracle, OverwritePolicy, Prompter, ResizeAlgorithm, Resolution,
    Result, Rotation, TransformConfig, TransformError, BW_THRESHOLD, MAX_DIMENSION, MAX_PIXELS,
    TARGET_DIMENSION,
};
pub use crate::core::job::output_file_name;
pub use manifest::{Job, Manifest};
pub use processors::{
    apply_color_mode, extract_images, rotate, target_dimensions, to_grayscale, BatchProcessor,
    Compressor, Loader, Resizer,
};
pub use utils::{
    collect_image_paths, collect_inputs, format_file_size, get_image_info, is_supported_format,
    ImageInfo, IMAGE_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchProcessor, ColorMode, OutputFormat, OverwritePolicy, Resolution, Rotation,
        TransformConfig,
    };
}

// Re-export commonly used types
pub use image::GrayImage;
