// greyform/src/processors/resizer.rs
use crate::core::{
    ColorMode, ResizeAlgorithm, Resolution, Result, TransformError, MAX_DIMENSION, MAX_PIXELS,
    TARGET_DIMENSION,
};
use image::{imageops, imageops::FilterType, GrayImage};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Fails when the target would exceed [`MAX_DIMENSION`] on a side or
    /// [`MAX_PIXELS`] in total.
    pub fn resize(
        &self,
        image: &GrayImage,
        resolution: Resolution,
        mode: ColorMode,
    ) -> Result<GrayImage> {
        let (width, height) = match target_dimensions(image.dimensions(), resolution) {
            Some(dimensions) => dimensions,
            None => return Ok(image.clone()),
        };

        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return Ok(image.clone());
        }

        check_target(width, height)?;

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        Ok(imageops::resize(image, width, height, self.filter_for(mode)))
    }

    /// Binary images keep two levels only with nearest-neighbour sampling.
    fn filter_for(&self, mode: ColorMode) -> FilterType {
        if mode == ColorMode::BlackAndWhite {
            return FilterType::Nearest;
        }

        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

fn check_target(width: u32, height: u32) -> Result<()> {
    let pixels = width as u64 * height as u64;
    if width > MAX_DIMENSION || height > MAX_DIMENSION || pixels > MAX_PIXELS {
        return Err(TransformError::InvalidParameter(format!(
            "Resize target {}x{} exceeds limits ({} per side, {} pixels)",
            width, height, MAX_DIMENSION, MAX_PIXELS
        )));
    }
    Ok(())
}

/// Size after applying `resolution`, `None` for [`Resolution::Original`].
///
/// The fixed side becomes 512 and the other is scaled by the same ratio,
/// truncated toward zero and never below one pixel.
pub fn target_dimensions((width, height): (u32, u32), resolution: Resolution) -> Option<(u32, u32)> {
    let target = TARGET_DIMENSION as f64;
    let scale = |fixed: u32, other: u32| (((target / fixed as f64) * other as f64) as u32).max(1);

    match resolution {
        Resolution::Original => None,
        Resolution::MaxDimension512 => {
            if width > height {
                Some((TARGET_DIMENSION, scale(width, height)))
            } else {
                Some((scale(height, width), TARGET_DIMENSION))
            }
        }
        Resolution::MinDimension512 => {
            if width < height {
                Some((TARGET_DIMENSION, scale(width, height)))
            } else {
                Some((scale(height, width), TARGET_DIMENSION))
            }
        }
    }
}
