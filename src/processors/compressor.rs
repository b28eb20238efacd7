// greyform/src/processors/compressor.rs
use crate::core::{Result, TransformError};
use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;
use std::path::Path;

pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// Encodes fully in memory before touching `path`, so a failed encode
    /// leaves no partial file behind.
    pub fn save(&self, image: &GrayImage, path: &Path) -> Result<()> {
        let format = detect_format(path)?;

        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        let bytes = self.compress_to_bytes(image, format)?;
        std::fs::write(path, bytes)?;

        self.log_save_result(path)
    }

    pub fn compress_to_bytes(&self, image: &GrayImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
                image.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                image.write_to(&mut buffer, ImageFormat::Png)?;
                if self.optimize_png {
                    return self.optimize_png_bytes(&buffer.into_inner());
                }
            }
            ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::WebP => {
                image.write_to(&mut buffer, format)?;
            }
            other => {
                return Err(TransformError::UnsupportedFormat(format!(
                    "Cannot write {:?} images",
                    other
                )));
            }
        }

        Ok(buffer.into_inner())
    }

    fn optimize_png_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        optimize_from_memory(data, &Options::default())
            .map_err(|e| TransformError::ProcessingError(format!("PNG optimization failed: {}", e)))
    }

    fn log_save_result(&self, path: &Path) -> Result<()> {
        let file_size = std::fs::metadata(path)?.len();
        log::info!("Saved: {} ({} bytes)", path.display(), file_size);
        Ok(())
    }
}

fn detect_format(path: &Path) -> Result<ImageFormat> {
    path.extension()
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| {
            TransformError::UnsupportedFormat(format!(
                "No known image format for {}",
                path.display()
            ))
        })
}
