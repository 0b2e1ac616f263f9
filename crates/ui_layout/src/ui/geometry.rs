//! Absolute geometry
//!
//! Resolved pixel values: sizes and rectangles with no unit information.
//! Points and offsets use [`Vec2`].

use crate::foundation::math::Vec2;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Policy for reconciling an aspect ratio with an independently specified size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectMode {
    /// Aspect ratio is not enforced
    #[default]
    Ignore,
    /// Shrink one axis until the ratio holds (result fits inside the original)
    Shrink,
    /// Grow one axis until the ratio holds (result covers the original)
    Expand,
    /// Keep the height, derive the width from the ratio
    AdjustWidth,
    /// Keep the width, derive the height from the ratio
    AdjustHeight,
}

/// Absolute size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Size {
    /// Create a size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Size as a vector
    pub fn to_vec(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Correct this size so that `width / height == ratio` according to `mode`
    ///
    /// Sizes with no positive component are left alone. A ratio of zero or
    /// less is not rejected: the result collapses or flips a dimension.
    pub fn scale_to_aspect(&mut self, mode: AspectMode, ratio: f32) {
        if mode == AspectMode::Ignore {
            return;
        }
        if self.width <= 0.0 && self.height <= 0.0 {
            return;
        }
        let expected_width = self.height * ratio;
        let keep_height = match mode {
            AspectMode::Shrink => expected_width <= self.width,
            AspectMode::Expand => expected_width >= self.width,
            AspectMode::AdjustWidth => true,
            AspectMode::AdjustHeight => false,
            AspectMode::Ignore => return,
        };

        if keep_height {
            self.width = expected_width;
        } else {
            self.height = self.width / ratio;
        }
    }

    /// Copy of this size corrected with [`Size::scale_to_aspect`]
    pub fn scaled_to_aspect(mut self, mode: AspectMode, ratio: f32) -> Self {
        self.scale_to_aspect(mode, ratio);
        self
    }
}

impl From<Vec2> for Size {
    fn from(v: Vec2) -> Self {
        Size::new(v.x, v.y)
    }
}

impl Add for Size {
    type Output = Size;
    fn add(self, other: Size) -> Size {
        Size::new(self.width + other.width, self.height + other.height)
    }
}

impl Sub for Size {
    type Output = Size;
    fn sub(self, other: Size) -> Size {
        Size::new(self.width - other.width, self.height - other.height)
    }
}

impl Mul<f32> for Size {
    type Output = Size;
    fn mul(self, factor: f32) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

impl AbsDiffEq for Size {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.width.abs_diff_eq(&other.width, epsilon) && self.height.abs_diff_eq(&other.height, epsilon)
    }
}

impl RelativeEq for Size {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.width.relative_eq(&other.width, epsilon, max_relative)
            && self.height.relative_eq(&other.height, epsilon, max_relative)
    }
}

/// Axis-aligned rectangle in absolute pixels, stored as min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}

impl Rect {
    /// Create from edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    /// Create from a position and a size
    pub fn from_position_size(position: Vec2, size: Size) -> Self {
        Self {
            min: position,
            max: position + size.to_vec(),
        }
    }

    /// Zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Top-left corner
    pub fn position(&self) -> Vec2 {
        self.min
    }

    /// Width
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Size
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Move so that the top-left corner is at `position`, keeping the size
    pub fn set_position(&mut self, position: Vec2) {
        let size = self.size();
        self.min = position;
        self.max = position + size.to_vec();
    }

    /// Resize keeping the top-left corner
    pub fn set_size(&mut self, size: Size) {
        self.max = self.min + size.to_vec();
    }

    /// Copy translated by `offset`
    pub fn offset(&self, offset: Vec2) -> Rect {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Copy shrunk by `left`, `top`, `right` and `bottom` pixels
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        Rect::new(
            self.min.x + left,
            self.min.y + top,
            self.max.x - right,
            self.max.y - bottom,
        )
    }

    /// Returns true if the point lies inside (min inclusive, max exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.y >= self.min.y && point.x < self.max.x && point.y < self.max.y
    }

    /// Overlapping area, or a zero rect when the two do not intersect
    pub fn intersection(&self, other: &Rect) -> Rect {
        if self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
        {
            Rect::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
            )
        } else {
            Rect::zero()
        }
    }
}

impl AbsDiffEq for Rect {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.min.abs_diff_eq(&other.min, epsilon) && self.max.abs_diff_eq(&other.max, epsilon)
    }
}

impl RelativeEq for Rect {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.min.relative_eq(&other.min, epsilon, max_relative)
            && self.max.relative_eq(&other.max, epsilon, max_relative)
    }
}
