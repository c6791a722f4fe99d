//! Image loading for the crop engine.
//!
//! This module provides functionality for:
//! - Decoding encoded image bytes (JPEG, PNG) into an RGBA bitmap
//! - Applying EXIF orientation so the natural size matches what a browser shows
//!
//! # Architecture
//!
//! Loading is synchronous. The host is responsible for the asynchronous part
//! (reading the file or fetching bytes) and for the lifetime of any object URL
//! it created to preview the file; the loader only ever sees bytes.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::load_image;
//!
//! let bytes = std::fs::read("avatar.jpg").unwrap();
//! let source = load_image(&bytes).unwrap();
//! println!("Loaded {}x{}", source.size().width(), source.size().height());
//! ```

mod loader;
mod types;

pub use loader::load_image;
pub use types::{Orientation, SourceImage};
