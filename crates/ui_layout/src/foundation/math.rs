//! Math utilities and types
//!
//! Absolute (pixel) vectors and rotations come from nalgebra; the unified
//! coordinate types live in [`crate::ui::units`].

pub use nalgebra::{UnitQuaternion, Vector2};

/// 2D vector type, used for absolute pixel positions
pub type Vec2 = Vector2<f32>;

/// Quaternion type for element rotations
pub type Quat = UnitQuaternion<f32>;

/// Math utility functions
pub mod utils {
    /// Round a coordinate to the nearest whole pixel, halves away from zero
    pub fn align_to_pixels(value: f32) -> f32 {
        value.round()
    }
}
