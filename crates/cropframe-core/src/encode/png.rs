//! PNG encoding using the `image` crate's PNG encoder.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::CropError;

/// Encode an RGBA raster to PNG bytes.
///
/// # Errors
///
/// Returns `CropError::EncodingFailed` if the raster is empty or the encoder
/// reports a failure.
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, CropError> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(CropError::EncodingFailed(format!(
            "cannot encode a {width}x{height} raster"
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(raster.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| CropError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
