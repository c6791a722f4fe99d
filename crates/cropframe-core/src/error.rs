//! Error taxonomy for the crop engine.
//!
//! Only configuration, loading and export can fail. Interaction input that
//! falls outside the viewport bounds is clamped and never surfaces here.

use thiserror::Error;

/// Errors produced by the crop engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CropError {
    /// The source bytes could not be decoded into an image.
    #[error("Image load failed: {0}")]
    ImageLoadFailed(String),

    /// The requested aspect ratio is zero, negative or not finite.
    #[error("Invalid aspect ratio: {0} (must be a positive finite number)")]
    InvalidAspectRatio(f64),

    /// The source bitmap is empty or does not match the layout it is used with.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The export step could not obtain a drawing surface.
    #[error("Render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),

    /// PNG encoding of the exported raster failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// A configuration value is outside its domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
