//! Element tree and layout
//!
//! Elements are positioned with unified dimensions relative to their
//! parent's content area and resolved into cached pixel rectangles.

pub mod backend;
pub mod cached_rect;
pub mod content_sizing;
pub mod element;
pub mod error;
pub mod geometry;
pub mod tree;
pub mod units;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use backend::{BackendError, DrawCall, NullRenderer, RenderBackend};
pub use cached_rect::{CachedRect, RectKind};
pub use element::{Element, ElementBehaviour, HorizontalAlignment, PlainElement, VerticalAlignment};
pub use error::UiError;
pub use geometry::{AspectMode, Rect, Size};
pub use tree::ElementTree;
pub use units::{UDim, URect, USize, UVector2, UVector3};
pub use widgets::{Label, Panel, RenderSurface};
