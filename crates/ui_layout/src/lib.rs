//! # UI Layout
//!
//! Retained-mode element tree with unified-dimension layout.
//!
//! ## Features
//!
//! - **Unified Dimensions**: every extent is `scale * parent + offset`
//! - **Cached Screen Areas**: outer and inner rectangles regenerate lazily
//! - **Selective Propagation**: only children whose content area changed are laid out again
//! - **Constraints**: min/max size, aspect locking and pixel alignment
//! - **Content Sizing**: fit an element to its content, directly or by bisection
//! - **Events**: synchronous notifications for every layout and hierarchy change
//!
//! ## Quick Start
//!
//! ```rust
//! use ui_layout::prelude::*;
//!
//! fn main() -> Result<(), UiError> {
//!     let mut tree = ElementTree::new(Size::new(800.0, 600.0));
//!     let window = tree.create_element_with(Panel::with_border(4.0));
//!     tree.set_size(window, USize::percent(50.0, 50.0))?;
//!
//!     let button = tree.create_element();
//!     tree.set_size(button, USize::new(UDim::relative(1.0), UDim::px(24.0)))?;
//!     tree.set_vertical_alignment(button, VerticalAlignment::Bottom)?;
//!     tree.add_child(window, button)?;
//!
//!     assert_eq!(tree.unclipped_outer_rect(button)?, Rect::new(4.0, 272.0, 396.0, 296.0));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod ui;

/// Common imports for layout users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, UiConfig},
        events::{ElementEvent, EventHandler, EventSystem, EventType, SubscriptionId},
        foundation::{
            collections::ElementId,
            math::{Quat, Vec2},
        },
        ui::{
            AspectMode, ElementBehaviour, ElementTree, HorizontalAlignment, Label, NullRenderer, Panel,
            Rect, RenderBackend, RenderSurface, Size, UDim, URect, USize, UVector2, UVector3, UiError,
            VerticalAlignment,
        },
    };
}
