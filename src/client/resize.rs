use image::{DynamicImage, imageops::FilterType};
use std::io::Cursor;

/// Longest edge after the best-effort shrink.
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality for the re-encode.
pub const JPEG_QUALITY: u8 = 80;

/// Best-effort payload shrink before upload: bound the longest edge and
/// re-encode as JPEG at reduced quality. Any decode/encode failure falls
/// back to the original bytes and mime type untouched. The relay accepts
/// either.
pub fn shrink_image(bytes: &[u8], mime_type: &str) -> (Vec<u8>, String) {
    match try_shrink(bytes) {
        Ok(shrunk) => (shrunk, "image/jpeg".to_string()),
        Err(_) => (bytes.to_vec(), mime_type.to_string()),
    }
}

fn try_shrink(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width().max(img.height()) > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let img = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut output = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut output), JPEG_QUALITY);
    img.write_with_encoder(encoder)?;

    Ok(output)
}
