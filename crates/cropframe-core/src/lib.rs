//! Cropframe Core - crop, zoom and pan engine
//!
//! This crate turns an arbitrary image into a fixed-aspect-ratio bitmap
//! (avatars, banners, icons) the way a crop dialog does: the user pans and
//! zooms the image behind a fixed crop box, and the exported raster is
//! exactly what the preview showed.
//!
//! # Pipeline
//!
//! 1. [`decode::load_image`] - bytes to an upright RGBA [`SourceImage`]
//! 2. [`compute_layout`] - crop box and scale model for a container size
//! 3. [`CropController`] - drag, wheel, slider and resize events
//! 4. [`preview_transform`] - affine map for drawing the preview
//! 5. [`export_crop`] / [`encode::encode_png`] - final raster and PNG bytes
//!
//! [`CropSession`] bundles these for a host dialog.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod session;
pub mod viewport;

pub use config::CropConfig;
pub use decode::SourceImage;
pub use error::CropError;
pub use export::export_crop;
pub use geometry::{AspectRatio, ImageSize, Point, Rect, Size};
pub use interaction::{CropController, InputEvent, SliderRange};
pub use layout::{compute_layout, CropBox, Layout, ScaleModel};
pub use render::{preview_transform, Affine, PreviewTransform};
pub use session::{CropHandler, CropSession, CroppedImage};
pub use viewport::Viewport;
