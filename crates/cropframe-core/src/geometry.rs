//! Plain geometry value types shared by every stage of the engine.
//!
//! All screen-space quantities are `f64` layout pixels. Image dimensions are
//! integer pixel counts that can never be zero.

use std::num::NonZeroU32;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// A point or vector in layout pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in layout pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in layout pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `other` lies horizontally within this rectangle, with tolerance `eps`.
    pub fn contains_horizontally(&self, other: &Rect, eps: f64) -> bool {
        self.left <= other.left + eps && self.right() >= other.right() - eps
    }

    /// Whether `other` lies vertically within this rectangle, with tolerance `eps`.
    pub fn contains_vertically(&self, other: &Rect, eps: f64) -> bool {
        self.top <= other.top + eps && self.bottom() >= other.bottom() - eps
    }
}

/// Natural pixel dimensions of a decoded image. Both axes are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl ImageSize {
    /// Returns `None` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Dimensions as floating point, for scale math.
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }
}

/// Target crop aspect ratio, `width / height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// 1:1, used for avatars and icons.
    pub const SQUARE: AspectRatio = AspectRatio(1.0);
    /// 3:1, used for banners.
    pub const BANNER: AspectRatio = AspectRatio(3.0);

    /// Validate a `width / height` ratio.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidAspectRatio` for zero, negative, NaN or
    /// infinite values.
    pub fn new(ratio: f64) -> Result<Self, CropError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(CropError::InvalidAspectRatio(ratio))
        }
    }

    /// Build a ratio from integral proportions such as `16:9`.
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, CropError> {
        if height == 0 {
            return Err(CropError::InvalidAspectRatio(f64::from(width) / 0.0));
        }
        Self::new(f64::from(width) / f64::from(height))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for AspectRatio {
    type Error = CropError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AspectRatio> for f64 {
    fn from(ratio: AspectRatio) -> f64 {
        ratio.0
    }
}
