//! Rasterization of the current framing into the output bitmap.
//!
//! # Algorithm
//!
//! Export uses inverse mapping through the preview matrix: for each pixel of
//! the output surface we take its center, map it back into source image space
//! with the inverted [`preview_transform`], and sample there.
//!
//! ```text
//! src = inverse(pixel_ratio × preview) · (dst_x + 0.5, dst_y + 0.5)
//! ```
//!
//! Sampling is bilinear over premultiplied RGBA, so transparent source pixels
//! do not bleed dark fringes. Destination pixels whose center falls outside
//! the source are transparent. Only `f64` arithmetic in a fixed order is
//! involved, so identical inputs produce identical bytes.

use image::{Rgba, RgbaImage};

use crate::config::CropConfig;
use crate::decode::SourceImage;
use crate::error::CropError;
use crate::geometry::Point;
use crate::layout::Layout;
use crate::render::{preview_transform, Affine};
use crate::viewport::Viewport;

/// Render the framed crop into a new RGBA bitmap.
///
/// The bitmap is `crop_box × config.pixel_ratio` pixels; with the default
/// ratio of 1.0 that is exactly the crop box.
///
/// # Errors
///
/// Returns `CropError::InvalidImage` if `source` does not match the image the
/// layout was computed for, and `CropError::RenderSurfaceUnavailable` if the
/// output surface would be empty, larger than
/// `config.max_surface_dimension`, or cannot be mapped back to the source.
pub fn export_crop(
    source: &SourceImage,
    viewport: &Viewport,
    layout: &Layout,
    config: &CropConfig,
) -> Result<RgbaImage, CropError> {
    let bitmap = source.bitmap();
    if source.size() != layout.natural {
        return Err(CropError::InvalidImage(format!(
            "source is {}x{}, layout expects {}x{}",
            bitmap.width(),
            bitmap.height(),
            layout.natural.width(),
            layout.natural.height()
        )));
    }

    let (out_w, out_h) = surface_size(layout, config)?;

    let ratio = config.pixel_ratio;
    let forward = Affine::IDENTITY
        .scale(ratio)
        .multiply(&preview_transform(layout, viewport).matrix);
    let inverse = forward.invert().ok_or_else(|| {
        CropError::RenderSurfaceUnavailable("preview transform is not invertible".to_string())
    })?;

    let mut output = RgbaImage::new(out_w, out_h);
    for (dst_x, dst_y, pixel) in output.enumerate_pixels_mut() {
        let center = Point::new(f64::from(dst_x) + 0.5, f64::from(dst_y) + 0.5);
        let src = inverse.apply(center);
        *pixel = sample_bilinear(bitmap, src.x, src.y);
    }

    tracing::debug!(
        width = out_w,
        height = out_h,
        zoom = viewport.zoom(),
        "exported crop"
    );
    Ok(output)
}

fn surface_size(layout: &Layout, config: &CropConfig) -> Result<(u32, u32), CropError> {
    let w = (layout.crop_box.width * config.pixel_ratio).round();
    let h = (layout.crop_box.height * config.pixel_ratio).round();
    let max = f64::from(config.max_surface_dimension);

    if !(w >= 1.0 && h >= 1.0) || w > max || h > max {
        return Err(CropError::RenderSurfaceUnavailable(format!(
            "cannot allocate a {w}x{h} surface (limit {max})"
        )));
    }
    // Range checked above, so the casts are exact.
    Ok((w as u32, h as u32))
}

/// Sample the source at continuous pixel coordinates `(x, y)`.
///
/// `(x, y)` addresses the source plane; pixel `i` covers `[i, i + 1)`. Points
/// outside `[0, width) × [0, height)` are transparent. Inside, neighbors are
/// clamped to the edge.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (f64::from(image.width()), f64::from(image.height()));
    if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
        return Rgba([0, 0, 0, 0]);
    }

    // Interpolate between texel centers.
    let cx = (x - 0.5).clamp(0.0, w - 1.0);
    let cy = (y - 0.5).clamp(0.0, h - 1.0);

    let x0 = cx.floor() as u32;
    let y0 = cy.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    let fx = cx - f64::from(x0);
    let fy = cy - f64::from(y0);

    let p00 = premultiplied(image.get_pixel(x0, y0));
    let p10 = premultiplied(image.get_pixel(x1, y0));
    let p01 = premultiplied(image.get_pixel(x0, y1));
    let p11 = premultiplied(image.get_pixel(x1, y1));

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3];
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let unpremultiply = |c: f64| (c * 255.0 / alpha).clamp(0.0, 255.0).round() as u8;
    Rgba([
        unpremultiply(acc[0]),
        unpremultiply(acc[1]),
        unpremultiply(acc[2]),
        alpha.clamp(0.0, 255.0).round() as u8,
    ])
}

#[inline]
fn premultiplied(px: &Rgba<u8>) -> [f64; 4] {
    let a = f64::from(px[3]);
    let k = a / 255.0;
    [
        f64::from(px[0]) * k,
        f64::from(px[1]) * k,
        f64::from(px[2]) * k,
        a,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AspectRatio, Size};
    use crate::layout::compute_layout;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 80x60 image, left half red and right half blue.
    fn split_image() -> SourceImage {
        let img = RgbaImage::from_fn(80, 60, |x, _| if x < 40 { RED } else { BLUE });
        SourceImage::from_rgba(img).unwrap()
    }

    /// 78 - 2 * 24 = 30: a 30x30 box with the same scales as 800x600 in 300x300.
    fn split_layout(source: &SourceImage) -> Layout {
        compute_layout(
            Size::new(78.0, 78.0),
            AspectRatio::SQUARE,
            source.size(),
            &CropConfig::default(),
        )
    }

    fn render(source: &SourceImage, vp: &Viewport, layout: &Layout) -> RgbaImage {
        let config = CropConfig::default();
        export_crop(source, vp, layout, &config).unwrap()
    }

    #[test]
    fn test_output_matches_crop_box_size() {
        let source = split_image();
        let layout = split_layout(&source);
        let out = render(&source, &layout.initial_viewport(), &layout);
        assert_eq!(out.dimensions(), (30, 30));
    }

    #[test]
    fn test_boundary_lands_where_preview_puts_it() {
        let source = split_image();
        let layout = split_layout(&source);
        let vp = layout.initial_viewport();

        // The color boundary at source x = 40 maps to box x = 15.
        let matrix = preview_transform(&layout, &vp).matrix;
        let boundary = matrix.apply(Point::new(40.0, 30.0));
        assert!((boundary.x - 15.0).abs() < 1e-6);

        let out = render(&source, &vp, &layout);
        assert_eq!(out.get_pixel(5, 15), &RED);
        assert_eq!(out.get_pixel(13, 15), &RED);
        assert_eq!(out.get_pixel(16, 15), &BLUE);
        assert_eq!(out.get_pixel(28, 15), &BLUE);
    }

    #[test]
    fn test_pan_moves_boundary() {
        let source = split_image();
        let layout = split_layout(&source);
        let zoom = layout.scale.cover_zoom;
        // Limit is (40 - 30) / 2 = 5.
        let vp = layout.settle(Point::new(100.0, 0.0), zoom);
        assert!((vp.offset().x - 5.0).abs() < 1e-9);

        let out = render(&source, &vp, &layout);
        // Boundary now at box x = 20.
        assert_eq!(out.get_pixel(18, 10), &RED);
        assert_eq!(out.get_pixel(21, 10), &BLUE);
    }

    #[test]
    fn test_letterbox_is_transparent() {
        let source = split_image();
        let layout = split_layout(&source);
        // At zoom 1 the image is 30x22.5, centered vertically.
        let vp = layout.settle(Point::ORIGIN, 1.0);
        let out = render(&source, &vp, &layout);
        assert_eq!(out.get_pixel(10, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(out.get_pixel(10, 29), &Rgba([0, 0, 0, 0]));
        assert_eq!(out.get_pixel(2, 15), &RED);
    }

    #[test]
    fn test_pixel_ratio_scales_surface() {
        let source = split_image();
        let layout = split_layout(&source);
        let mut config = CropConfig::default();
        config.pixel_ratio = 2.0;
        let vp = layout.initial_viewport();
        let out = export_crop(&source, &vp, &layout, &config).unwrap();
        assert_eq!(out.dimensions(), (60, 60));
        assert_eq!(out.get_pixel(26, 30), &RED);
        assert_eq!(out.get_pixel(33, 30), &BLUE);
    }

    #[test]
    fn test_oversized_surface_is_unavailable() {
        let source = split_image();
        let layout = split_layout(&source);
        let mut config = CropConfig::default();
        config.max_surface_dimension = 16;
        let vp = layout.initial_viewport();
        let err = export_crop(&source, &vp, &layout, &config).unwrap_err();
        assert!(matches!(err, CropError::RenderSurfaceUnavailable(_)));
    }

    #[test]
    fn test_mismatched_source_is_invalid() {
        let source = split_image();
        let layout = split_layout(&source);
        let other = SourceImage::from_rgba(RgbaImage::new(10, 10)).unwrap();
        let vp = layout.initial_viewport();
        let config = CropConfig::default();
        let err = export_crop(&other, &vp, &layout, &config).unwrap_err();
        assert!(matches!(err, CropError::InvalidImage(_)));
    }

    #[test]
    fn test_transparent_neighbors_do_not_darken() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let px = sample_bilinear(&img, 1.0, 0.5);
        assert_eq!(px[0], 255);
        assert_eq!(px[3], 128);
    }

    #[test]
    fn test_sample_outside_is_transparent() {
        let img = RgbaImage::from_pixel(4, 4, RED);
        assert_eq!(sample_bilinear(&img, -0.1, 1.0), Rgba([0, 0, 0, 0]));
        assert_eq!(sample_bilinear(&img, 1.0, 4.0), Rgba([0, 0, 0, 0]));
        assert_eq!(sample_bilinear(&img, 3.9, 3.9), RED);
    }
}
