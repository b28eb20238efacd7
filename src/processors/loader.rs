// greyform/src/processors/loader.rs
use crate::core::{Result, TransformError, MAX_DIMENSION};
use image::{DynamicImage, GenericImageView, GrayImage, ImageReader, Luma};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimension: u32,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
        }
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                TransformError::ProcessingError(format!("Failed to decode image: {}", e))
            })?;

        let (width, height) = image.dimensions();
        if width > self.max_dimension || height > self.max_dimension {
            return Err(TransformError::InvalidParameter(format!(
                "Image dimensions {}x{} exceed maximum {}x{}",
                width, height, self.max_dimension, self.max_dimension
            )));
        }

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    /// Loads `path` and reduces it to one 8-bit luminance channel.
    pub fn load_grayscale(&self, path: &Path) -> Result<GrayImage> {
        let image = self.load(path)?;
        Ok(to_grayscale(&image))
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(TransformError::InvalidParameter(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(TransformError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// ITU-R 601-2 luma, alpha dropped.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => {
            image.to_luma8()
        }
        _ => {
            let rgb = image.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                // Fixed-point weights 0.299/0.587/0.114 scaled by 2^16.
                let luma = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
                Luma([luma as u8])
            })
        }
    }
}
