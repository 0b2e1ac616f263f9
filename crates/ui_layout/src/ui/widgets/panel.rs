//! Panel widget - rectangular area with an optional border
//!
//! The border is non-client space: client children are laid out inside it,
//! non-client children (title bars, frame buttons) against the full area.

use crate::ui::element::ElementBehaviour;
use crate::ui::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Panel with a border of fixed pixel width
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Panel {
    /// Border width in pixels, taken from every edge
    pub border_width: f32,
    /// Extra space reserved at the top (title bar)
    pub title_height: f32,
}

impl Panel {
    /// Panel with a uniform border
    pub fn with_border(border_width: f32) -> Self {
        Self {
            border_width,
            title_height: 0.0,
        }
    }

    /// Panel with a border and a title bar
    pub fn with_title(border_width: f32, title_height: f32) -> Self {
        Self {
            border_width,
            title_height,
        }
    }
}

impl ElementBehaviour for Panel {
    fn inner_rect(&self, outer: Rect) -> Rect {
        let b = self.border_width;
        outer.inset(b, b + self.title_height, b, b)
    }
}
