// greyform/src/utils/mod.rs
use crate::core::{Result, TransformError};
use crate::processors::extract_images;
use image::{ColorType, ImageDecoder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as image inputs, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

pub fn is_supported_format(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn is_zip(path: &Path) -> bool {
    get_file_extension(path).as_deref() == Some("zip")
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Expands user inputs into the flat list of image files to transform.
///
/// Zip archives are extracted into their own directory under `scratch`,
/// directories are searched for images, anything else is passed through
/// as-is and left for the pipeline to accept or reject.
pub fn collect_inputs(inputs: &[PathBuf], recursive: bool, scratch: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        if is_zip(input) {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "archive".to_string());
            let dest = scratch.join(format!("{}-{}", index, stem));
            files.extend(extract_images(input, &dest)?);
        } else if input.is_dir() {
            files.extend(collect_image_paths(input, recursive)?);
        } else {
            files.push(input.clone());
        }
    }

    Ok(files)
}

/// Image files under `dir`, sorted by path.
pub fn collect_image_paths(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    let mut paths = Vec::new();
    for entry in walker.sort_by_file_name() {
        let entry = entry.map_err(|e| {
            TransformError::ProcessingError(format!("Failed to read {}: {}", dir.display(), e))
        })?;

        if entry.file_type().is_file() && is_supported_format(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    if paths.is_empty() {
        log::warn!("No image files found in {}", dir.display());
    }

    Ok(paths)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub color: ColorType,
}

/// Reads dimensions, container format and colour type from the image header.
/// Pixel data is never decoded.
pub fn get_image_info(path: &Path) -> Result<ImageInfo> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;

    let format = reader
        .format()
        .map(image_format_to_string)
        .unwrap_or_else(|| "Unknown".to_string());

    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    Ok(ImageInfo {
        width,
        height,
        format,
        color: decoder.color_type(),
    })
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::WebP => "WebP",
        image::ImageFormat::Tiff => "TIFF",
        image::ImageFormat::Bmp => "BMP",
        _ => "Unknown",
    }
    .to_string()
}
