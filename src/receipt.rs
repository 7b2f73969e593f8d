//! Receipt image preparation: decode, downscale, re-encode, base64.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose;
use image::ImageFormat;
use image::imageops::FilterType;
use tracing::debug;

use crate::constants::MAX_IMAGE_WIDTH;
use crate::error::VerifyError;

/// Reads the receipt at `path` and returns it as base64-encoded PNG bytes,
/// downscaled to at most [`MAX_IMAGE_WIDTH`] pixels wide. Narrow images keep
/// their dimensions but are still re-encoded to PNG.
pub fn encode_image(path: &Path) -> Result<String, VerifyError> {
    let img = image::open(path)?;

    let img = if img.width() > MAX_IMAGE_WIDTH {
        let height = scaled_height(img.width(), img.height());
        debug!(
            "Downscaling receipt from {}x{} to {}x{}",
            img.width(),
            img.height(),
            MAX_IMAGE_WIDTH,
            height
        );
        img.resize_exact(MAX_IMAGE_WIDTH, height, FilterType::Lanczos3)
    } else {
        img
    };

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(general_purpose::STANDARD.encode(buffer.into_inner()))
}

/// Height after scaling the width down to [`MAX_IMAGE_WIDTH`], truncated to a
/// whole pixel, never zero.
fn scaled_height(width: u32, height: u32) -> u32 {
    let scaled = u64::from(height) * u64::from(MAX_IMAGE_WIDTH) / u64::from(width);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}
