//! Output encoding for exported crops.
//!
//! The exporter produces an in-memory RGBA raster; hosts that upload the
//! result want an encoded file. PNG keeps the alpha channel, which matters
//! for letterboxed crops.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::encode::encode_png;
//!
//! let raster = image::RgbaImage::new(300, 300);
//! let png = encode_png(&raster).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

mod png;

pub use png::encode_png;
