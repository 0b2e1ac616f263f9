//! Render surface widget
//!
//! Anchors a subtree to an off-screen render target: the element and its
//! descendants resolve min/max sizes (and, when parentless, their area)
//! against the surface size rather than the display.

use crate::ui::element::ElementBehaviour;
use crate::ui::geometry::Size;

/// Element rendered into a texture of a fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSurface {
    /// Size of the render target in pixels
    pub surface_size: Size,
}

impl RenderSurface {
    /// Surface of the given size
    pub fn new(surface_size: Size) -> Self {
        Self { surface_size }
    }
}

impl ElementBehaviour for RenderSurface {
    fn root_container_size(&self) -> Option<Size> {
        Some(self.surface_size)
    }
}
