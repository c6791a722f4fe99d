//! Interaction controller: the only writer of the viewport.
//!
//! Input arrives as [`InputEvent`] messages, one at a time. Each event runs
//! to completion and replaces the viewport with a new value whose zoom has
//! been clamped and snapped and whose offset has been re-clamped for that
//! zoom. There is never a moment where one has moved and the other has not.
//!
//! Container resizes and aspect changes are messages as well: they recompute
//! the layout and reset the framing to the canonical cover state.

use serde::Serialize;

use crate::config::CropConfig;
use crate::error::CropError;
use crate::geometry::{AspectRatio, ImageSize, Point, Size};
use crate::layout::{compute_layout, Layout};
use crate::viewport::Viewport;

/// A single input to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a screen position.
    PointerDown(Point),
    /// Pointer moved to a screen position.
    PointerMove(Point),
    /// Pointer released or capture lost.
    PointerUp,
    /// Wheel scrolled; positive `delta_y` scrolls down and zooms out.
    Wheel { delta_y: f64 },
    /// Zoom slider set to an absolute value.
    Slider(f64),
    /// The hosting container changed size.
    ContainerResized(Size),
    /// A different aspect ratio was selected.
    AspectRatioChanged(AspectRatio),
    /// Return to the canonical framing.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// `anchor` is the pointer position minus the offset at press time.
    Dragging { anchor: Point },
}

/// Bounds for a zoom slider control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    /// Where the slider snaps to.
    pub cover: f64,
}

/// Owns the layout and viewport of one crop session.
#[derive(Debug, Clone)]
pub struct CropController {
    config: CropConfig,
    aspect: AspectRatio,
    natural: ImageSize,
    container: Size,
    layout: Layout,
    viewport: Viewport,
    drag: DragState,
}

impl CropController {
    /// Create a controller for an image of `natural` size.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfig` if `config` fails validation.
    pub fn new(
        natural: ImageSize,
        container: Size,
        aspect: AspectRatio,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        config.validate()?;
        let layout = compute_layout(container, aspect, natural, &config);
        Ok(Self {
            config,
            aspect,
            natural,
            container,
            viewport: layout.initial_viewport(),
            layout,
            drag: DragState::Idle,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn slider_range(&self) -> SliderRange {
        SliderRange {
            min: self.layout.scale.min_zoom,
            max: self.layout.scale.max_zoom,
            cover: self.layout.scale.cover_zoom,
        }
    }

    /// Apply one input event.
    ///
    /// Non-finite coordinates, deltas and zoom values are dropped.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(p) => self.pointer_down(p),
            InputEvent::PointerMove(p) => self.pointer_move(p),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
            InputEvent::Slider(zoom) => self.set_zoom(zoom),
            InputEvent::ContainerResized(size) => self.resize(size),
            InputEvent::AspectRatioChanged(aspect) => self.set_aspect_ratio(aspect),
            InputEvent::Reset => self.reset(),
        }
    }

    pub fn pointer_down(&mut self, p: Point) {
        if !p.is_finite() {
            return;
        }
        self.drag = DragState::Dragging {
            anchor: p - self.viewport.offset(),
        };
    }

    pub fn pointer_move(&mut self, p: Point) {
        let DragState::Dragging { anchor } = self.drag else {
            return;
        };
        if !p.is_finite() {
            return;
        }
        let raw = p - anchor;
        let zoom = self.viewport.zoom();
        let offset = self.layout.clamp_offset(raw.x, raw.y, zoom);
        self.commit(Viewport::new(offset, zoom));
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            return;
        }
        let delta = -delta_y * self.config.scroll_sensitivity;
        self.zoom_to(self.viewport.zoom() + delta);
    }

    /// Set an absolute zoom, as from a slider.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom_to(zoom);
    }

    pub fn resize(&mut self, container: Size) {
        self.container = container;
        self.relayout();
    }

    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        self.relayout();
    }

    pub fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.commit(self.layout.initial_viewport());
    }

    fn zoom_to(&mut self, zoom: f64) {
        let next = self.layout.settle(self.viewport.offset(), zoom);
        self.commit(next);
    }

    fn relayout(&mut self) {
        self.layout = compute_layout(self.container, self.aspect, self.natural, &self.config);
        self.reset();
    }

    fn commit(&mut self, next: Viewport) {
        tracing::trace!(
            x = next.offset().x,
            y = next.offset().y,
            zoom = next.zoom(),
            "viewport updated"
        );
        self.viewport = next;
    }
}
