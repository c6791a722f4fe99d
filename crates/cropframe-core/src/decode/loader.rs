//! Decoding of encoded image bytes with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{Orientation, SourceImage};
use crate::error::CropError;

/// Decode image bytes into an upright RGBA source image.
///
/// The format is guessed from the content. EXIF orientation is applied when
/// present; missing or unreadable EXIF data leaves the image as decoded.
///
/// # Errors
///
/// Returns `CropError::ImageLoadFailed` if the bytes cannot be decoded and
/// `CropError::InvalidImage` if the decoded image has a zero dimension.
pub fn load_image(bytes: &[u8]) -> Result<SourceImage, CropError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CropError::ImageLoadFailed(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CropError::ImageLoadFailed(e.to_string()))?;

    let upright = orientation.apply(img).into_rgba8();
    tracing::debug!(
        width = upright.width(),
        height = upright.height(),
        ?orientation,
        "decoded source image"
    );
    SourceImage::from_rgba(upright)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}
