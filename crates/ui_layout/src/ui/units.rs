//! Unified dimensions
//!
//! A unified dimension is `scale * base + offset`: a fraction of some base
//! extent (usually the parent's content area) plus a fixed pixel offset.
//! The composite types here pair them up for positions, sizes and areas.
//! Nothing is validated; negative or NaN values flow through arithmetic.

use super::geometry::Size;
use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// One unified dimension
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UDim {
    /// Fraction of the base extent
    pub scale: f32,
    /// Absolute pixel offset
    pub offset: f32,
}

impl UDim {
    /// Create a unified dimension
    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    /// All-zero dimension
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Purely relative dimension (`1.0` is the full base extent)
    pub const fn relative(scale: f32) -> Self {
        Self::new(scale, 0.0)
    }

    /// Purely absolute dimension in pixels
    pub const fn absolute(offset: f32) -> Self {
        Self::new(0.0, offset)
    }

    /// `value` pixels
    pub const fn px(value: f32) -> Self {
        Self::absolute(value)
    }

    /// `value` percent of the base extent
    pub fn percent(value: f32) -> Self {
        Self::relative(value / 100.0)
    }

    /// Resolve against a base extent
    pub fn resolve(&self, base: f32) -> f32 {
        self.scale * base + self.offset
    }
}

impl Add for UDim {
    type Output = UDim;
    fn add(self, other: UDim) -> UDim {
        UDim::new(self.scale + other.scale, self.offset + other.offset)
    }
}

impl Sub for UDim {
    type Output = UDim;
    fn sub(self, other: UDim) -> UDim {
        UDim::new(self.scale - other.scale, self.offset - other.offset)
    }
}

impl Mul<f32> for UDim {
    type Output = UDim;
    fn mul(self, factor: f32) -> UDim {
        UDim::new(self.scale * factor, self.offset * factor)
    }
}

impl Mul<UDim> for f32 {
    type Output = UDim;
    fn mul(self, dim: UDim) -> UDim {
        dim * self
    }
}

impl Div<f32> for UDim {
    type Output = UDim;
    fn div(self, divisor: f32) -> UDim {
        UDim::new(self.scale / divisor, self.offset / divisor)
    }
}

impl Neg for UDim {
    type Output = UDim;
    fn neg(self) -> UDim {
        UDim::new(-self.scale, -self.offset)
    }
}

/// Unified 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UVector2 {
    /// Horizontal component
    pub x: UDim,
    /// Vertical component
    pub y: UDim,
}

impl UVector2 {
    /// Create a unified vector
    pub const fn new(x: UDim, y: UDim) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const fn zero() -> Self {
        Self::new(UDim::zero(), UDim::zero())
    }

    /// Absolute vector in pixels
    pub const fn px(x: f32, y: f32) -> Self {
        Self::new(UDim::px(x), UDim::px(y))
    }

    /// Resolve each axis against the matching extent of `base`
    pub fn resolve(&self, base: Size) -> Vec2 {
        Vec2::new(self.x.resolve(base.width), self.y.resolve(base.height))
    }
}

impl Add for UVector2 {
    type Output = UVector2;
    fn add(self, other: UVector2) -> UVector2 {
        UVector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for UVector2 {
    type Output = UVector2;
    fn sub(self, other: UVector2) -> UVector2 {
        UVector2::new(self.x - other.x, self.y - other.y)
    }
}

/// Unified size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct USize {
    /// Width component
    pub width: UDim,
    /// Height component
    pub height: UDim,
}

impl USize {
    /// Create a unified size
    pub const fn new(width: UDim, height: UDim) -> Self {
        Self { width, height }
    }

    /// Zero size (also means "unbounded" when used as a maximum)
    pub const fn zero() -> Self {
        Self::new(UDim::zero(), UDim::zero())
    }

    /// Absolute size in pixels
    pub const fn px(width: f32, height: f32) -> Self {
        Self::new(UDim::px(width), UDim::px(height))
    }

    /// Relative size in percent of the base extent
    pub fn percent(width: f32, height: f32) -> Self {
        Self::new(UDim::percent(width), UDim::percent(height))
    }

    /// Resolve width against `base.width` and height against `base.height`
    pub fn resolve(&self, base: Size) -> Size {
        Size::new(self.width.resolve(base.width), self.height.resolve(base.height))
    }
}

impl Add for USize {
    type Output = USize;
    fn add(self, other: USize) -> USize {
        USize::new(self.width + other.width, self.height + other.height)
    }
}

impl Mul<f32> for USize {
    type Output = USize;
    fn mul(self, factor: f32) -> USize {
        USize::new(self.width * factor, self.height * factor)
    }
}

/// Unified 3D vector, used for the rotation pivot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UVector3 {
    /// X component
    pub x: UDim,
    /// Y component
    pub y: UDim,
    /// Z component
    pub z: UDim,
}

impl UVector3 {
    /// Create a unified 3D vector
    pub const fn new(x: UDim, y: UDim, z: UDim) -> Self {
        Self { x, y, z }
    }
}

/// Unified rectangle stored as top-left corner plus size
///
/// Keeping the size itself (rather than a second corner) means whatever is
/// stored is handed back bit-for-bit by [`URect::size`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct URect {
    /// Top-left corner
    pub min: UVector2,
    /// Extent from `min`
    pub size: USize,
}

impl URect {
    /// Create from position and size
    pub const fn new(min: UVector2, size: USize) -> Self {
        Self { min, size }
    }

    /// Create from four dimensions (left, top, right, bottom)
    pub fn from_dims(left: UDim, top: UDim, right: UDim, bottom: UDim) -> Self {
        Self::new(UVector2::new(left, top), USize::new(right - left, bottom - top))
    }

    /// Top-left corner
    pub fn position(&self) -> UVector2 {
        self.min
    }

    /// Size
    pub fn size(&self) -> USize {
        self.size
    }

    /// Bottom-right corner
    pub fn max(&self) -> UVector2 {
        UVector2::new(self.min.x + self.size.width, self.min.y + self.size.height)
    }

    /// Width
    pub fn width(&self) -> UDim {
        self.size.width
    }

    /// Height
    pub fn height(&self) -> UDim {
        self.size.height
    }

    /// Move to `position`, keeping the size
    pub fn set_position(&mut self, position: UVector2) {
        self.min = position;
    }

    /// Resize to `size`, keeping the position
    pub fn set_size(&mut self, size: USize) {
        self.size = size;
    }

    /// Set position and size together
    pub fn set_position_and_size(&mut self, position: UVector2, size: USize) {
        self.min = position;
        self.size = size;
    }
}
