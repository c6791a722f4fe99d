//! Crop box and scale computation.
//!
//! Given a container size, a target aspect ratio and the natural size of the
//! loaded image, [`compute_layout`] finds the on-screen crop box and the
//! [`ScaleModel`] relating the image to it.
//!
//! # Scale model
//!
//! ```text
//! fit_scale  = min(box_w / img_w, box_h / img_h)   whole image visible
//! fill_scale = max(box_w / img_w, box_h / img_h)   image covers the box
//! cover_zoom = fill_scale / fit_scale              >= 1
//! ```
//!
//! Zoom is a multiplier on `base_scale` (= `fit_scale`), so zoom 1 shows the
//! whole image and `cover_zoom` fills the box exactly.

use serde::{Deserialize, Serialize};

use crate::config::CropConfig;
use crate::geometry::{AspectRatio, ImageSize, Point, Rect, Size};
use crate::viewport::Viewport;

/// The crop box in layout pixels. Both sides are whole pixels, at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBox {
    pub width: f64,
    pub height: f64,
}

impl CropBox {
    /// The crop box as a rectangle centered on the origin.
    pub fn centered_rect(&self) -> Rect {
        Rect {
            left: -self.width / 2.0,
            top: -self.height / 2.0,
            width: self.width,
            height: self.height,
        }
    }
}

/// Scale factors and zoom bounds for one image in one crop box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleModel {
    pub fit_scale: f64,
    pub fill_scale: f64,
    pub base_scale: f64,
    pub cover_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub crop_box: CropBox,
    pub scale: ScaleModel,
    pub natural: ImageSize,
    pub(crate) snap_threshold: f64,
}

/// Compute the crop box and scale model.
///
/// The container loses `config.padding` on every side. A rectangle of the
/// requested aspect ratio is then fitted into what remains: when the
/// available area is wider than the ratio the height binds, otherwise the
/// width does. The binding side is floored to whole pixels and the other
/// side is derived from it, so the box ratio is off by less than a pixel.
pub fn compute_layout(
    container: Size,
    aspect: AspectRatio,
    natural: ImageSize,
    config: &CropConfig,
) -> Layout {
    let crop_box = fit_crop_box(container, aspect, config.padding);

    let img = natural.to_size();
    let scale_x = crop_box.width / img.width;
    let scale_y = crop_box.height / img.height;
    let fit_scale = scale_x.min(scale_y);
    let fill_scale = scale_x.max(scale_y);
    let cover_zoom = fill_scale / fit_scale;

    let scale = ScaleModel {
        fit_scale,
        fill_scale,
        base_scale: fit_scale,
        cover_zoom,
        min_zoom: 1.0,
        max_zoom: config
            .max_zoom_floor
            .max(cover_zoom * config.cover_zoom_headroom),
    };

    tracing::debug!(
        crop_w = crop_box.width,
        crop_h = crop_box.height,
        fit_scale,
        cover_zoom,
        max_zoom = scale.max_zoom,
        "computed crop layout"
    );

    Layout {
        crop_box,
        scale,
        natural,
        snap_threshold: config.snap_threshold,
    }
}

fn fit_crop_box(container: Size, aspect: AspectRatio, padding: f64) -> CropBox {
    let avail_w = sanitize_extent(container.width - 2.0 * padding);
    let avail_h = sanitize_extent(container.height - 2.0 * padding);
    let ratio = aspect.value();

    if avail_w / avail_h > ratio {
        let height = whole_pixels(avail_h);
        CropBox {
            width: whole_pixels(height * ratio),
            height,
        }
    } else {
        let width = whole_pixels(avail_w);
        CropBox {
            width,
            height: whole_pixels(width / ratio),
        }
    }
}

fn whole_pixels(extent: f64) -> f64 {
    extent.floor().max(1.0)
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(1.0)
    } else {
        1.0
    }
}

impl Layout {
    /// The canonical viewport: centered, at cover zoom.
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(Point::ORIGIN, self.scale.cover_zoom)
    }

    /// Rendered image size at `zoom`.
    pub fn render_size(&self, zoom: f64) -> Size {
        let effective = self.scale.base_scale * zoom;
        let img = self.natural.to_size();
        Size::new(img.width * effective, img.height * effective)
    }

    /// The rendered image rectangle, in coordinates centered on the crop box.
    pub fn image_rect(&self, viewport: &Viewport) -> Rect {
        let size = self.render_size(viewport.zoom());
        let offset = viewport.offset();
        Rect {
            left: offset.x - size.width / 2.0,
            top: offset.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }
}
