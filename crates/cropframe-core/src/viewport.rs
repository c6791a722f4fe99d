//! Viewport state and the clamp/snap rules every transition goes through.
//!
//! A [`Viewport`] is the `{offset, zoom}` pair. `offset` is the translation of
//! the image center from the crop box center in layout pixels; `zoom` is a
//! multiplier on the layout's base scale.
//!
//! Outside this crate a viewport can only be obtained from a layout or a
//! controller, so nothing but the interaction controller moves it.

use serde::Serialize;

use crate::geometry::Point;
use crate::layout::Layout;

/// Current framing of the image inside the crop box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    offset: Point,
    zoom: f64,
}

impl Viewport {
    pub(crate) fn new(offset: Point, zoom: f64) -> Self {
        Self { offset, zoom }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl Layout {
    /// Clamp an offset so the image leaves no gap inside the crop box at `zoom`.
    ///
    /// On an axis where the rendered image is wider than the box the offset
    /// may range over `±(render - box) / 2`; otherwise it is forced to 0.
    pub fn clamp_offset(&self, x: f64, y: f64, zoom: f64) -> Point {
        let render = self.render_size(zoom);
        let limit_x = axis_limit(render.width, self.crop_box.width);
        let limit_y = axis_limit(render.height, self.crop_box.height);
        Point::new(x.clamp(-limit_x, limit_x), y.clamp(-limit_y, limit_y))
    }

    /// Snap `zoom` to the cover zoom when it lies within the snap threshold.
    pub fn snap_zoom(&self, zoom: f64) -> f64 {
        let cover = self.scale.cover_zoom;
        if (zoom - cover).abs() < self.snap_threshold {
            cover
        } else {
            zoom
        }
    }

    /// Clamp `zoom` into `[min_zoom, max_zoom]`, then snap.
    pub fn settle_zoom(&self, zoom: f64) -> f64 {
        self.snap_zoom(zoom.clamp(self.scale.min_zoom, self.scale.max_zoom))
    }

    /// A viewport at `zoom` (settled) with `offset` re-clamped against it.
    pub(crate) fn settle(&self, offset: Point, zoom: f64) -> Viewport {
        let zoom = self.settle_zoom(zoom);
        Viewport::new(self.clamp_offset(offset.x, offset.y, zoom), zoom)
    }
}

fn axis_limit(render: f64, crop: f64) -> f64 {
    if render > crop {
        (render - crop) / 2.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CropConfig;
    use crate::geometry::{AspectRatio, ImageSize, Size};
    use crate::layout::compute_layout;

    fn scenario() -> Layout {
        compute_layout(
            Size::new(348.0, 348.0),
            AspectRatio::SQUARE,
            ImageSize::new(800, 600).unwrap(),
            &CropConfig::default(),
        )
    }

    #[test]
    fn test_far_drag_clamps_to_limit() {
        let layout = scenario();
        let cover = layout.scale.cover_zoom;
        let p = layout.clamp_offset(10_000.0, 0.0, cover);
        assert!((p.x - 50.0).abs() < 1e-6);
        assert_eq!(p.y, 0.0);

        let p = layout.clamp_offset(-10_000.0, -10_000.0, cover);
        assert!((p.x + 50.0).abs() < 1e-6);
        // Height is exactly covered: no vertical play.
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_narrow_image_is_forced_centered() {
        let layout = scenario();
        // At zoom 1 the image is 300x225: narrower than the box vertically.
        let p = layout.clamp_offset(30.0, 30.0, 1.0);
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_snap_near_cover() {
        let layout = scenario();
        let cover = layout.scale.cover_zoom;
        assert_eq!(layout.snap_zoom(1.40), cover);
        assert_eq!(layout.snap_zoom(2.0), 2.0);
        assert_eq!(layout.snap_zoom(cover), cover);
    }

    #[test]
    fn test_settle_clamps_before_snapping() {
        let layout = scenario();
        assert_eq!(layout.settle_zoom(0.2), 1.0);
        assert_eq!(layout.settle_zoom(50.0), 5.0);
        assert_eq!(layout.settle_zoom(f64::INFINITY), 5.0);
    }

    #[test]
    fn test_settle_reclamps_offset() {
        let layout = scenario();
        // Valid at zoom 3 (render 900x675), invalid at cover zoom.
        let vp = layout.settle(Point::new(250.0, 150.0), 3.0);
        assert_eq!(vp.zoom(), 3.0);
        assert!((vp.offset().x - 250.0).abs() < 1e-9);

        let vp = layout.settle(vp.offset(), 1.4);
        assert_eq!(vp.zoom(), layout.scale.cover_zoom);
        assert!((vp.offset().x - 50.0).abs() < 1e-6);
        assert!(vp.offset().y.abs() < 1e-6);
    }
}
