// greyform/src/processors/rotator.rs
use crate::core::Rotation;
use image::{imageops, GrayImage};

/// Rotates clockwise; the canvas grows to fit, nothing is cropped.
pub fn rotate(image: GrayImage, rotation: Rotation) -> GrayImage {
    match rotation {
        Rotation::None => image,
        Rotation::Clockwise90 => imageops::rotate90(&image),
        Rotation::Rotate180 => imageops::rotate180(&image),
        Rotation::Clockwise270 => imageops::rotate270(&image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn marked() -> GrayImage {
        // 3x2 with a single white pixel in the top-left corner
        let mut image = GrayImage::new(3, 2);
        image.put_pixel(0, 0, Luma([255]));
        image
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        assert_eq!(rotate(marked(), Rotation::Clockwise90).dimensions(), (2, 3));
        assert_eq!(rotate(marked(), Rotation::Clockwise270).dimensions(), (2, 3));
        assert_eq!(rotate(marked(), Rotation::Rotate180).dimensions(), (3, 2));
    }

    #[test]
    fn clockwise_moves_top_left_to_top_right() {
        let rotated = rotate(marked(), Rotation::Clockwise90);
        assert_eq!(rotated.get_pixel(1, 0), &Luma([255]));

        let rotated = rotate(marked(), Rotation::Clockwise270);
        assert_eq!(rotated.get_pixel(0, 2), &Luma([255]));
    }

    #[test]
    fn zero_is_identity() {
        assert_eq!(rotate(marked(), Rotation::None), marked());
    }
}
