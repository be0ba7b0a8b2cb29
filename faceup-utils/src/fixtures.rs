//! Synthetic image generation for tests and demos.
//!
//! The repository ships no binary image assets; tests that need an encoded photo
//! generate one in memory instead.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Produce an encoded PNG with the given dimensions.
///
/// The pixels form a diagonal gradient so images of different sizes produce
/// different payloads and decoded previews are visually distinguishable.
pub fn synthetic_photo(width: u32, height: u32) -> Result<Vec<u8>> {
    let pattern = RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 256) as u8;
        let g = (y % 256) as u8;
        let b = ((x + y) % 256) as u8;
        Rgb([r, g, b])
    });

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(pattern)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .with_context(|| format!("failed to encode {width}x{height} synthetic photo"))?;
    Ok(bytes)
}
