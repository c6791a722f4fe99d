//! Core types for image loading.

use image::{DynamicImage, RgbaImage};

use crate::error::CropError;
use crate::geometry::ImageSize;

/// EXIF orientation values (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Transform a decoded image so it displays upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => img,
            Orientation::FlipHorizontal => img.fliph(),
            Orientation::Rotate180 => img.rotate180(),
            Orientation::FlipVertical => img.flipv(),
            Orientation::Transpose => img.rotate90().fliph(),
            Orientation::Rotate90CW => img.rotate90(),
            Orientation::Transverse => img.rotate270().fliph(),
            Orientation::Rotate270CW => img.rotate270(),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded, upright source image ready for cropping.
///
/// The bitmap is immutable for the lifetime of a crop session and shared by
/// reference between preview and export.
#[derive(Debug, Clone)]
pub struct SourceImage {
    size: ImageSize,
    bitmap: RgbaImage,
}

impl SourceImage {
    /// Wrap an already-decoded RGBA bitmap.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidImage` if either dimension is zero.
    pub fn from_rgba(bitmap: RgbaImage) -> Result<Self, CropError> {
        let (width, height) = bitmap.dimensions();
        let Some(size) = ImageSize::new(width, height) else {
            let message = format!("degenerate image {width}x{height}");
            return Err(CropError::InvalidImage(message));
        };
        Ok(Self { size, bitmap })
    }

    /// Wrap raw RGBA8 pixels, e.g. `ImageData` from a browser-decoded image.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidImage` if the buffer length is not
    /// `width * height * 4` or either dimension is zero.
    pub fn from_raw_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CropError> {
        let actual = pixels.len();
        let bitmap = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            CropError::InvalidImage(format!(
                "expected {} bytes for {width}x{height} RGBA, got {actual}",
                u64::from(width) * u64::from(height) * 4
            ))
        })?;
        Self::from_rgba(bitmap)
    }

    /// Natural (upright) dimensions.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }
}
