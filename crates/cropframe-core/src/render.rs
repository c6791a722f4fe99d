//! Preview transform for the on-screen crop view.
//!
//! The preview is a single affine map from image pixel coordinates (origin at
//! the image's top-left corner) to crop box coordinates (origin at the crop
//! box's top-left corner). It is built the way a 2D canvas context is driven:
//!
//! ```text
//! translate(box_w / 2, box_h / 2)      crop box center
//! translate(offset.x, offset.y)        pan
//! scale(base_scale * zoom)             zoom
//! translate(-img_w / 2, -img_h / 2)    image drawn centered
//! ```
//!
//! The exporter rasterizes through exactly this matrix, so what is previewed
//! is what is exported.

use serde::Serialize;

use crate::geometry::{Point, Rect};
use crate::layout::Layout;
use crate::viewport::Viewport;

/// A 2D affine transform in canvas `setTransform(a, b, c, d, e, f)` order.
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// `self × other`: `other` is applied first.
    pub fn multiply(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Append a translation, like `CanvasRenderingContext2D.translate`.
    pub fn translate(self, tx: f64, ty: f64) -> Affine {
        self.multiply(&Affine {
            e: tx,
            f: ty,
            ..Affine::IDENTITY
        })
    }

    /// Append a uniform scale, like `CanvasRenderingContext2D.scale`.
    pub fn scale(self, s: f64) -> Affine {
        self.multiply(&Affine {
            a: s,
            d: s,
            ..Affine::IDENTITY
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

/// Everything a host needs to draw the preview for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewTransform {
    /// Image pixel space to crop box space.
    pub matrix: Affine,
    /// `base_scale * zoom`.
    pub effective_scale: f64,
    /// Image bounds in crop box space (origin at the box's top-left).
    pub image_rect: Rect,
}

impl PreviewTransform {
    /// CSS `transform` value for an element laid out at the crop box origin
    /// with `transform-origin: 0 0` and the image's natural size.
    pub fn css_matrix(&self) -> String {
        let m = &self.matrix;
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            m.a, m.b, m.c, m.d, m.e, m.f
        )
    }
}

/// Compute the preview transform for the current viewport.
pub fn preview_transform(layout: &Layout, viewport: &Viewport) -> PreviewTransform {
    let img = layout.natural.to_size();
    let effective_scale = layout.scale.base_scale * viewport.zoom();
    let offset = viewport.offset();

    let matrix = Affine::IDENTITY
        .translate(layout.crop_box.width / 2.0, layout.crop_box.height / 2.0)
        .translate(offset.x, offset.y)
        .scale(effective_scale)
        .translate(-img.width / 2.0, -img.height / 2.0);

    let top_left = matrix.apply(Point::ORIGIN);
    PreviewTransform {
        matrix,
        effective_scale,
        image_rect: Rect {
            left: top_left.x,
            top: top_left.y,
            width: img.width * effective_scale,
            height: img.height * effective_scale,
        },
    }
}
