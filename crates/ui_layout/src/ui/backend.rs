//! UI Render Backend Trait
//!
//! Defines the interface between the element tree and rendering backends.
//! Keeps the layout core independent of OpenGL/Direct3D/Vulkan specifics:
//! the tree only needs the display size and somewhere to send resolved
//! rectangles.

use super::geometry::{Rect, Size};
use crate::foundation::collections::ElementId;
use crate::foundation::math::Quat;
use thiserror::Error;

/// Render backend errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Draw call outside of `begin_pass`/`end_pass`
    #[error("No render pass in progress")]
    NoPassInProgress,

    /// `begin_pass` called twice
    #[error("Render pass already in progress")]
    PassInProgress,

    /// Backend specific failure
    #[error("Backend failure: {0}")]
    Failure(String),
}

/// Backend-agnostic UI rendering interface
pub trait RenderBackend {
    /// Size of the display (or render target) in pixels
    ///
    /// This is the root container size for parentless elements.
    fn display_size(&self) -> Size;

    /// Begin UI rendering pass
    fn begin_pass(&mut self) -> Result<(), BackendError>;

    /// Draw one element at its resolved screen rectangle
    fn draw_element(&mut self, element: ElementId, rect: Rect, rotation: &Quat) -> Result<(), BackendError>;

    /// End UI rendering pass
    fn end_pass(&mut self) -> Result<(), BackendError>;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Element drawn
    pub element: ElementId,
    /// Screen rectangle
    pub rect: Rect,
    /// Element rotation
    pub rotation: Quat,
}

/// Backend that draws nothing and records what it was asked to draw
#[derive(Debug, Clone)]
pub struct NullRenderer {
    display_size: Size,
    in_pass: bool,
    draw_calls: Vec<DrawCall>,
    passes: usize,
}

impl NullRenderer {
    /// Create a null renderer with the given display size
    pub fn new(display_size: Size) -> Self {
        Self {
            display_size,
            in_pass: false,
            draw_calls: Vec::new(),
            passes: 0,
        }
    }

    /// Change the reported display size
    pub fn set_display_size(&mut self, size: Size) {
        self.display_size = size;
    }

    /// Draw calls of the last completed or current pass
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Number of completed passes
    pub fn pass_count(&self) -> usize {
        self.passes
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl RenderBackend for NullRenderer {
    fn display_size(&self) -> Size {
        self.display_size
    }

    fn begin_pass(&mut self) -> Result<(), BackendError> {
        if self.in_pass {
            return Err(BackendError::PassInProgress);
        }
        self.in_pass = true;
        self.draw_calls.clear();
        Ok(())
    }

    fn draw_element(&mut self, element: ElementId, rect: Rect, rotation: &Quat) -> Result<(), BackendError> {
        if !self.in_pass {
            return Err(BackendError::NoPassInProgress);
        }
        self.draw_calls.push(DrawCall {
            element,
            rect,
            rotation: *rotation,
        });
        Ok(())
    }

    fn end_pass(&mut self) -> Result<(), BackendError> {
        if !self.in_pass {
            return Err(BackendError::NoPassInProgress);
        }
        self.in_pass = false;
        self.passes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_draw_outside_pass_fails() {
        let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let mut renderer = NullRenderer::default();

        assert_eq!(
            renderer.draw_element(id, Rect::zero(), &Quat::identity()),
            Err(BackendError::NoPassInProgress)
        );
        assert_eq!(renderer.end_pass(), Err(BackendError::NoPassInProgress));
    }

    #[test]
    fn test_pass_records_draw_calls() {
        let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let mut renderer = NullRenderer::new(Size::new(320.0, 200.0));

        renderer.begin_pass().unwrap();
        assert_eq!(renderer.begin_pass(), Err(BackendError::PassInProgress));
        renderer
            .draw_element(id, Rect::new(0.0, 0.0, 10.0, 10.0), &Quat::identity())
            .unwrap();
        renderer.end_pass().unwrap();

        assert_eq!(renderer.display_size(), Size::new(320.0, 200.0));
        assert_eq!(renderer.pass_count(), 1);
        assert_eq!(renderer.draw_calls().len(), 1);
        assert_eq!(renderer.draw_calls()[0].element, id);
    }
}
