// greyform/src/processors/mod.rs
mod archive;
mod batch;
mod color;
mod compressor;
mod loader;
mod resizer;
mod rotator;

pub use archive::extract_images;
pub use batch::BatchProcessor;
pub use color::apply_color_mode;
pub use compressor::Compressor;
pub use loader::{to_grayscale, Loader};
pub use resizer::{target_dimensions, Resizer};
pub use rotator::rotate;
