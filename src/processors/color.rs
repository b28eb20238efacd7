// greyform/src/processors/color.rs
use crate::core::{ColorMode, BW_THRESHOLD};
use image::GrayImage;
use imageproc::contrast::{threshold, ThresholdType};

/// Applies the colour mode to an already single-channel image.
pub fn apply_color_mode(image: GrayImage, mode: ColorMode) -> GrayImage {
    match mode {
        ColorMode::Grayscale => image,
        ColorMode::BlackAndWhite => {
            log::debug!("Binarizing at threshold {}", BW_THRESHOLD);
            threshold(&image, BW_THRESHOLD, ThresholdType::Binary)
        }
    }
}
