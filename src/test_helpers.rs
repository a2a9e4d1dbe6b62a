//! Shared test utilities: deterministic fixture images written to disk.
//!
//! Fixtures use few enough colors to survive GIF palette quantization
//! unchanged, so every built-in format round-trips exactly.

use crate::imaging::{CodecRegistry, save_image};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Pixel value at `(x, y)` of every fixture image.
pub fn fixture_pixel(x: u32, y: u32) -> Rgb<u8> {
    Rgb([(x * 20 % 256) as u8, (y * 30 % 256) as u8, 90])
}

pub fn fixture_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, fixture_pixel))
}

/// Write a fixture using the registered codec for the path's extension.
/// Panics if the extension has no codec.
pub fn write_fixture(path: &Path, width: u32, height: u32) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_else(|| panic!("fixture path {} has no extension", path.display()));
    let (_, codec) = CodecRegistry::standard()
        .get(ext)
        .unwrap_or_else(|| panic!("no codec registered for '{ext}'"));
    save_image(path, &fixture_image(width, height), codec.encode).unwrap();
}

/// Write a fixture in `format` regardless of the path's extension.
pub fn write_fixture_as(path: &Path, width: u32, height: u32, format: ImageFormat) {
    fixture_image(width, height)
        .save_with_format(path, format)
        .unwrap();
}
