//! Serializable snapshots of session state for JavaScript.

use cropframe_core::CropSession;
use serde::Serialize;

/// Everything the host needs to redraw the crop dialog after an event.
///
/// Field names are camelCase on the JavaScript side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub crop_width: f64,
    pub crop_height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub cover_zoom: f64,
    pub dragging: bool,
    /// CSS `transform` for the preview image (with `transform-origin: 0 0`).
    pub transform: String,
}

impl CropState {
    pub(crate) fn from_session(session: &CropSession) -> Self {
        let controller = session.controller();
        let viewport = controller.viewport();
        let crop_box = controller.layout().crop_box;
        let range = controller.slider_range();
        Self {
            zoom: viewport.zoom(),
            offset_x: viewport.offset().x,
            offset_y: viewport.offset().y,
            crop_width: crop_box.width,
            crop_height: crop_box.height,
            min_zoom: range.min,
            max_zoom: range.max,
            cover_zoom: range.cover,
            dragging: controller.is_dragging(),
            transform: session.preview().css_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropframe_core::{AspectRatio, CropConfig, Size, SourceImage};

    fn solid(width: u32, height: u32) -> SourceImage {
        let pixels = vec![200u8; (width * height * 4) as usize];
        SourceImage::from_raw_rgba(width, height, pixels).unwrap()
    }

    #[test]
    fn test_state_snapshot() {
        let session = CropSession::new(
            solid(800, 600),
            Size::new(348.0, 348.0),
            AspectRatio::SQUARE,
            CropConfig::default(),
        )
        .unwrap();
        let state = CropState::from_session(&session);

        assert_eq!(state.crop_width, 300.0);
        assert_eq!(state.crop_height, 300.0);
        assert_eq!(state.offset_x, 0.0);
        assert!((state.zoom - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(state.zoom, state.cover_zoom);
        assert_eq!(state.min_zoom, 1.0);
        assert_eq!(state.max_zoom, 5.0);
        assert!(!state.dragging);
        assert!(state.transform.starts_with("matrix("));
    }
}
