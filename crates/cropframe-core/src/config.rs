//! Engine configuration.
//!
//! Every tunable constant of the crop engine lives in [`CropConfig`]. The
//! struct deserializes with `#[serde(default)]`, so hosts only supply the
//! fields they want to override.

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Tunable constants for layout, interaction and export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Padding in layout pixels subtracted from each side of the container.
    pub padding: f64,
    /// Zoom distance from the cover zoom within which zoom snaps to it.
    pub snap_threshold: f64,
    /// Zoom units per wheel delta unit, with deltas in pixels.
    ///
    /// A single wheel event starting at the cover zoom must move further than
    /// `snap_threshold` or it snaps straight back. With the defaults that
    /// means `|delta_y| >= 75`; line-mode deltas of 1 to 3 never escape.
    pub scroll_sensitivity: f64,
    /// Lower bound for the maximum zoom.
    pub max_zoom_floor: f64,
    /// Maximum zoom as a multiple of the cover zoom, when that exceeds the floor.
    pub cover_zoom_headroom: f64,
    /// Output pixels per layout pixel for export (1.0 = crop box size).
    pub pixel_ratio: f64,
    /// Largest width or height of an export surface.
    pub max_surface_dimension: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            padding: 24.0,
            snap_threshold: 0.15,
            scroll_sensitivity: 0.002,
            max_zoom_floor: 5.0,
            cover_zoom_headroom: 2.0,
            pixel_ratio: 1.0,
            max_surface_dimension: 16_384,
        }
    }
}

impl CropConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is inside its domain.
    pub fn validate(&self) -> Result<(), CropError> {
        fn check(ok: bool, what: &str, value: f64) -> Result<(), CropError> {
            if ok {
                Ok(())
            } else {
                Err(CropError::InvalidConfig(format!("{what} = {value}")))
            }
        }

        check(
            self.padding.is_finite() && self.padding >= 0.0,
            "padding",
            self.padding,
        )?;
        check(
            self.snap_threshold.is_finite() && self.snap_threshold >= 0.0,
            "snap_threshold",
            self.snap_threshold,
        )?;
        check(
            self.scroll_sensitivity.is_finite() && self.scroll_sensitivity > 0.0,
            "scroll_sensitivity",
            self.scroll_sensitivity,
        )?;
        check(
            self.max_zoom_floor.is_finite() && self.max_zoom_floor >= 1.0,
            "max_zoom_floor",
            self.max_zoom_floor,
        )?;
        check(
            self.cover_zoom_headroom.is_finite() && self.cover_zoom_headroom >= 1.0,
            "cover_zoom_headroom",
            self.cover_zoom_headroom,
        )?;
        check(
            self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0,
            "pixel_ratio",
            self.pixel_ratio,
        )?;
        check(
            self.max_surface_dimension > 0,
            "max_surface_dimension",
            f64::from(self.max_surface_dimension),
        )
    }
}
